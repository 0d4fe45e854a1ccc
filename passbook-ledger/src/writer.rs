//! Per-source ledger tables.

use passbook_core::LEDGER_COLUMNS;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LedgerError;
use crate::ledger::Ledger;

pub const TABLE_SUFFIX: &str = "_transactions.csv";

/// `<output_dir>/<source>_transactions.csv`
pub fn source_table_path(output_dir: &Path, source_name: &str) -> PathBuf {
    output_dir.join(format!("{source_name}{TABLE_SUFFIX}"))
}

/// Write `ledger` to `path`, header included even when empty.
///
/// The table is written beside the target and renamed into place, so a reader
/// never sees a half-written file.
pub fn write_ledger(ledger: &Ledger, path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
    }

    let tmp = path.with_extension("csv.partial");
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| LedgerError::csv(&tmp, e))?;
        wtr.write_record(LEDGER_COLUMNS).map_err(|e| LedgerError::csv(&tmp, e))?;
        for record in ledger {
            wtr.serialize(record).map_err(|e| LedgerError::csv(&tmp, e))?;
        }
        wtr.flush().map_err(|e| LedgerError::io(&tmp, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| LedgerError::io(path, e))?;

    debug!(file = %path.display(), records = ledger.len(), "ledger table written");
    Ok(())
}
