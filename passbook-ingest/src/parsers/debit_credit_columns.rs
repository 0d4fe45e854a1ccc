//! Current-account CSV export with separate debit and credit columns.
//!
//! The export opens with an 18-line account preamble (blank lines included)
//! followed by the column header:
//!   Tran Date,CHQNO,PARTICULARS,DR,CR,BAL,SOL
//!   01-04-2024,,UPI/P2M/409112/SWIGGY,"1,200.50",,"10,000.00",1234
//!
//! Exactly one of DR/CR is populated on a real transaction row.

use passbook_core::{Candidate, IngestError, TransactionType};
use regex::Regex;
use std::sync::OnceLock;

use super::{cell, parse_rows, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const PREAMBLE_ROWS: usize = 18;
const DATE_FORMAT: &str = "%d-%m-%Y";

const DATE_COL: usize = 0;
const DESCRIPTION_COL: usize = 2;
const DEBIT_COL: usize = 3;
const CREDIT_COL: usize = 4;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("invalid dd-mm-yyyy regex"))
}

/// Pick the populated side of a debit/credit column pair. Blank cells count as
/// empty; both or neither populated is an invalid row.
pub(crate) fn pick_populated<'a>(
    debit: &'a str,
    credit: &'a str,
) -> Result<(&'a str, TransactionType), IngestError> {
    match (debit.trim(), credit.trim()) {
        (d, "") if !d.is_empty() => Ok((d, TransactionType::Debit)),
        ("", c) if !c.is_empty() => Ok((c, TransactionType::Credit)),
        (d, c) => Err(IngestError::AmbiguousPolarity {
            debit: d.to_string(),
            credit: c.to_string(),
        }),
    }
}

pub struct DebitCreditColumnsParser;

impl DebitCreditColumnsParser {
    pub fn new() -> Self {
        DebitCreditColumnsParser
    }

    pub fn parse_row(&self, row: &[String]) -> Result<Option<Candidate>, IngestError> {
        let date = cell(row, DATE_COL);
        if !date_re().is_match(date) {
            return Ok(None);
        }

        let (amount, transaction_type) = pick_populated(cell(row, DEBIT_COL), cell(row, CREDIT_COL))?;

        Ok(Some(Candidate::typed(
            date,
            DATE_FORMAT,
            cell(row, DESCRIPTION_COL),
            amount,
            transaction_type,
        )))
    }
}

impl Default for DebitCreditColumnsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for DebitCreditColumnsParser {
    fn grammar(&self) -> Grammar {
        Grammar::DebitCreditColumns
    }

    fn kind(&self) -> StatementKind {
        StatementKind::BankAccount
    }

    fn layout(&self) -> Layout {
        Layout::Delimited {
            extension: "csv",
            delimiter: b',',
        }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        // rows are physical lines: preamble plus the column header line
        parse_rows(doc, PREAMBLE_ROWS + 1, |row| self.parse_row(row))
    }
}
