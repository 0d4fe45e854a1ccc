//! Unified ledger: concatenation of every per-source table with exact
//! duplicate rows removed, first occurrence kept.
//!
//! Rows are compared as the text written to disk, column for column. There
//! is no fuzzy matching; two charges that differ only in description spacing
//! are both kept.

use passbook_core::LEDGER_COLUMNS;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::LedgerError;

pub const UNIFIED_FILE_NAME: &str = "all_accounts.csv";

/// One table row in `LEDGER_COLUMNS` order.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedLedger {
    pub rows: Vec<Row>,
    pub tables_read: usize,
    pub duplicates_dropped: usize,
}

/// Read one table, reordering its columns to `LEDGER_COLUMNS`.
///
/// A missing file, a zero-byte file, or a header-only file yields no rows. A
/// header without one of the ledger columns is an error.
pub fn read_table(path: &Path) -> Result<Vec<Row>, LedgerError> {
    if !path.exists() {
        warn!(file = %path.display(), "ledger table not found");
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| LedgerError::csv(path, e))?;

    let headers = rdr.headers().map_err(|e| LedgerError::csv(path, e))?.clone();
    if headers.is_empty() {
        debug!(file = %path.display(), "empty ledger table");
        return Ok(Vec::new());
    }

    let mut order = Vec::with_capacity(LEDGER_COLUMNS.len());
    for column in LEDGER_COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| LedgerError::SchemaMismatch {
                path: path.to_path_buf(),
                column,
            })?;
        order.push(idx);
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LedgerError::csv(path, e))?;
        rows.push(order.iter().map(|&i| record.get(i).unwrap_or("").to_string()).collect());
    }
    Ok(rows)
}

/// Drop exact duplicate rows, keeping the first occurrence. Returns the number dropped.
pub fn dedup_rows(rows: &mut Vec<Row>) -> usize {
    let before = rows.len();
    let mut seen = HashSet::with_capacity(rows.len());
    rows.retain(|row| seen.insert(row.clone()));
    before - rows.len()
}

/// Concatenate `tables` in the given order and deduplicate.
pub fn merge_tables(tables: &[PathBuf]) -> Result<MergedLedger, LedgerError> {
    let mut merged = MergedLedger::default();
    for path in tables {
        let rows = read_table(path)?;
        debug!(file = %path.display(), rows = rows.len(), "table read");
        merged.rows.extend(rows);
        merged.tables_read += 1;
    }
    merged.duplicates_dropped = dedup_rows(&mut merged.rows);

    info!(
        tables = merged.tables_read,
        rows = merged.rows.len(),
        duplicates = merged.duplicates_dropped,
        "ledgers merged"
    );
    Ok(merged)
}

/// Write the unified ledger to `path`, replacing any previous one.
pub fn write_unified(merged: &MergedLedger, path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
    }

    let tmp = path.with_extension("csv.partial");
    {
        let mut wtr = csv::Writer::from_path(&tmp).map_err(|e| LedgerError::csv(&tmp, e))?;
        wtr.write_record(LEDGER_COLUMNS).map_err(|e| LedgerError::csv(&tmp, e))?;
        for row in &merged.rows {
            wtr.write_record(row).map_err(|e| LedgerError::csv(&tmp, e))?;
        }
        wtr.flush().map_err(|e| LedgerError::io(&tmp, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| LedgerError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(cells: [&str; 5]) -> Row {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut rows = vec![
            row(["01-01-2024", "A", "1.00", "DEBIT", "x"]),
            row(["02-01-2024", "B", "2.00", "DEBIT", "x"]),
            row(["01-01-2024", "A", "1.00", "DEBIT", "x"]),
            row(["01-01-2024", "A", "1.00", "CREDIT", "x"]),
        ];
        assert_eq!(dedup_rows(&mut rows), 1);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][1], "B");

        assert_eq!(dedup_rows(&mut rows), 0);
    }

    #[test]
    fn test_columns_are_reordered_by_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.csv");
        fs::write(
            &path,
            "source_name,transaction_type,amount,description,date\namex,DEBIT,5.00,TEA,01-02-2024\n",
        )
        .unwrap();
        assert_eq!(read_table(&path).unwrap(), vec![row(["01-02-2024", "TEA", "5.00", "DEBIT", "amex"])]);
    }

    #[test]
    fn test_missing_and_empty_tables_have_no_rows() {
        let tmp = TempDir::new().unwrap();
        let zero = tmp.path().join("zero.csv");
        fs::write(&zero, "").unwrap();
        let header_only = tmp.path().join("header.csv");
        fs::write(&header_only, "date,description,amount,transaction_type,source_name\n").unwrap();

        assert!(read_table(&tmp.path().join("absent.csv")).unwrap().is_empty());
        assert!(read_table(&zero).unwrap().is_empty());
        assert!(read_table(&header_only).unwrap().is_empty());
    }

    #[test]
    fn test_schema_mismatch_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, "date,description,amount,source_name\n01-02-2024,TEA,5.00,amex\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, LedgerError::SchemaMismatch { column: "transaction_type", .. }));
    }
}
