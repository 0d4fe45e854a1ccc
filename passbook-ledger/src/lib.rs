//! passbook-ledger: ledger building, per-source CSV tables, and the deduplicated unified ledger.

pub mod aggregate;
pub mod error;
pub mod ledger;
pub mod writer;

pub use aggregate::{dedup_rows, merge_tables, read_table, write_unified, MergedLedger, Row, UNIFIED_FILE_NAME};
pub use error::LedgerError;
pub use ledger::{Ledger, LedgerBuilder};
pub use writer::{source_table_path, write_ledger, TABLE_SUFFIX};
