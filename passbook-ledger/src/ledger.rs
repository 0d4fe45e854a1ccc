//! In-memory ledgers.

use passbook_core::{ledger_scale, BigDecimal, TransactionRecord};

/// Accumulates one institution's records in file and unit order.
#[derive(Debug)]
pub struct LedgerBuilder {
    source_name: String,
    records: Vec<TransactionRecord>,
}

impl LedgerBuilder {
    pub fn new(source_name: impl Into<String>) -> Self {
        LedgerBuilder {
            source_name: source_name.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn build(self) -> Ledger {
        Ledger {
            source_name: self.source_name,
            records: self.records,
        }
    }
}

/// A finished, read-only ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    source_name: String,
    records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Sum of amounts by direction: (credits, debits).
    pub fn totals(&self) -> (BigDecimal, BigDecimal) {
        let zero = || BigDecimal::from(0);
        let (cr, dr) = self.records.iter().fold((zero(), zero()), |(cr, dr), r| {
            if r.is_credit() {
                (cr + &r.amount, dr)
            } else {
                (cr, dr + &r.amount)
            }
        });
        (ledger_scale(cr), ledger_scale(dr))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
