//! Parser output before canonicalization.

use crate::canonical::CANONICAL_DATE_FORMAT;
use crate::record::{TransactionRecord, TransactionType};

/// How a candidate's direction is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polarity {
    /// The grammar decided the type itself (marker token, populated column, keyword).
    Typed(TransactionType),
    /// An explicit type column; validated against CREDIT/DEBIT after uppercasing.
    Label(String),
    /// A single signed amount column: non-negative is DEBIT, negative is CREDIT.
    Signed,
}

/// One transaction as a grammar saw it: source-specific date text, raw amount text
/// and whatever the grammar knows about its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub date: String,
    /// chrono format the grammar's dates are written in
    pub date_format: &'static str,
    pub description: String,
    pub amount: String,
    pub polarity: Polarity,
    /// 1-based line or row the candidate came from; 0 when not read from a file
    pub unit: usize,
}

impl Candidate {
    pub fn typed(
        date: impl Into<String>,
        date_format: &'static str,
        description: impl Into<String>,
        amount: impl Into<String>,
        transaction_type: TransactionType,
    ) -> Self {
        Candidate {
            date: date.into(),
            date_format,
            description: description.into(),
            amount: amount.into(),
            polarity: Polarity::Typed(transaction_type),
            unit: 0,
        }
    }

    pub fn signed(
        date: impl Into<String>,
        date_format: &'static str,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Candidate {
            date: date.into(),
            date_format,
            description: description.into(),
            amount: amount.into(),
            polarity: Polarity::Signed,
            unit: 0,
        }
    }

    pub fn labelled(
        date: impl Into<String>,
        date_format: &'static str,
        description: impl Into<String>,
        amount: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Candidate {
            date: date.into(),
            date_format,
            description: description.into(),
            amount: amount.into(),
            polarity: Polarity::Label(label.into()),
            unit: 0,
        }
    }

    pub fn at_unit(mut self, unit: usize) -> Self {
        self.unit = unit;
        self
    }
}

impl From<&TransactionRecord> for Candidate {
    fn from(rec: &TransactionRecord) -> Self {
        Candidate::typed(
            rec.display_date(),
            CANONICAL_DATE_FORMAT,
            rec.description.clone(),
            rec.display_amount(),
            rec.transaction_type,
        )
    }
}
