use std::path::PathBuf;

use thiserror::Error;

/// Conditions that stop an institution's run. Lines that simply do not match a
/// grammar are never reported through this type.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("expected exactly one of debit/credit to be populated, got debit={debit:?} credit={credit:?}")]
    AmbiguousPolarity { debit: String, credit: String },

    #[error("invalid date '{value}' (expected {format})")]
    InvalidDate { value: String, format: &'static str },

    #[error("invalid amount '{value}'")]
    InvalidAmount { value: String },

    #[error("unknown transaction type '{value}'")]
    UnknownTransactionType { value: String },

    #[error("missing column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("expected {expected} content")]
    UnexpectedContent { expected: &'static str },

    #[error("{}, unit {unit}: {source}", .path.display())]
    AtUnit {
        path: PathBuf,
        unit: usize,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    /// Attach the file and 1-based unit (line or row) number that produced the error.
    pub fn at(self, path: impl Into<PathBuf>, unit: usize) -> Self {
        match self {
            located @ IngestError::AtUnit { .. } => located,
            other => IngestError::AtUnit {
                path: path.into(),
                unit,
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_attached_once() {
        let err = IngestError::InvalidAmount { value: "abc".to_string() }
            .at("data/amex/a.csv", 4)
            .at("other.csv", 9);
        let msg = err.to_string();
        assert!(msg.starts_with("data/amex/a.csv, unit 4:"), "{msg}");
        assert!(msg.contains("invalid amount 'abc'"));
    }
}
