//! Per-institution run: discover files, decode, parse, canonicalize.

use anyhow::Result;
use passbook_core::canonicalize;
use passbook_ledger::{Ledger, LedgerBuilder};
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::reader::{discover_files, SourceReader};
use crate::registry::SourceSpec;

/// Counters reported after an institution finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub files_seen: usize,
    pub files_skipped: usize,
    pub records: usize,
}

/// Everything one institution produced.
#[derive(Debug)]
pub struct SourceBatch {
    pub source: String,
    pub ledger: Ledger,
    pub stats: SourceStats,
}

/// Run one institution end to end.
///
/// Files that fail to decode are logged and skipped. A matched unit with an
/// impossible value combination aborts the whole institution; the error names
/// the file and unit.
pub fn ingest_source(
    reader: &dyn SourceReader,
    spec: &SourceSpec,
    data_dir: &Path,
    passphrase: Option<&str>,
) -> Result<SourceBatch> {
    let parser = spec.grammar.parser();
    let layout = parser.layout();
    let dir = spec.input_dir(data_dir);

    if !dir.is_dir() {
        warn!(source = %spec.name, dir = %dir.display(), "source directory not found");
    }

    let files = discover_files(&dir, layout.extension());

    let mut stats = SourceStats::default();
    let mut builder = LedgerBuilder::new(&spec.name);

    for path in files {
        stats.files_seen += 1;
        debug!(source = %spec.name, file = %path.display(), "reading");

        let content = match reader.read(&path, &layout, passphrase) {
            Ok(content) => content,
            Err(e) => {
                warn!(source = %spec.name, file = %path.display(), "skipping undecodable file: {e:#}");
                stats.files_skipped += 1;
                continue;
            }
        };
        let doc = crate::types::SourceDocument { path, content };

        let candidates = parser.parse(&doc).inspect_err(|e| {
            error!(source = %spec.name, "invalid row: {e}");
        })?;

        for candidate in candidates {
            let unit = candidate.unit;
            let record = canonicalize(candidate, &spec.name)
                .map_err(|e| e.at(&doc.path, unit))
                .inspect_err(|e| error!(source = %spec.name, "invalid row: {e}"))?;
            builder.push(record);
        }
    }

    let ledger = builder.build();
    stats.records = ledger.len();
    info!(
        source = %spec.name,
        files = stats.files_seen,
        skipped = stats.files_skipped,
        records = stats.records,
        "source ingested"
    );

    Ok(SourceBatch {
        source: spec.name.clone(),
        ledger,
        stats,
    })
}
