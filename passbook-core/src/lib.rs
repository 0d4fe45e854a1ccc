//! passbook-core: canonical transaction types and the canonicalizer shared by every
//! statement grammar.

pub mod canonical;
pub mod candidate;
pub mod error;
pub mod record;

pub use bigdecimal::BigDecimal;

pub use canonical::{canonicalize, canonicalize_date, ledger_scale, parse_amount, CANONICAL_DATE_FORMAT};
pub use candidate::{Candidate, Polarity};
pub use error::IngestError;
pub use record::{TransactionRecord, TransactionType, LEDGER_COLUMNS};
