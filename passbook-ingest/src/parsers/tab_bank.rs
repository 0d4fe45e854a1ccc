//! Tab-delimited bank statement text, pre-processed by hand from the
//! issuer's document.
//!
//!   Txn Date\tValue Date\tDescription\tRef No./Cheque No.\tDebit\tCredit\tBalance
//!   02 Apr 2024\t02 Apr 2024\tATM WDL\tATM123\t2,000.00\t \t8,000.00
//!
//! Every row after the header is a transaction; debit and credit follow the
//! same exactly-one rule as the current-account CSV.

use passbook_core::{Candidate, IngestError};

use super::debit_credit_columns::pick_populated;
use super::{cell, header_index, parse_rows, Grammar, StatementParser};
use crate::types::{Layout, SourceContent, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d %b %Y";

const DATE_COL: usize = 0;
const DESCRIPTION_COL: usize = 2;
const DEBIT_COL: usize = 4;
const CREDIT_COL: usize = 5;

pub struct TabBankParser;

impl TabBankParser {
    pub fn new() -> Self {
        TabBankParser
    }

    pub fn parse_row(&self, row: &[String]) -> Result<Option<Candidate>, IngestError> {
        if row.iter().all(|c| c.trim().is_empty()) {
            return Ok(None);
        }

        let (amount, transaction_type) = pick_populated(cell(row, DEBIT_COL), cell(row, CREDIT_COL))?;

        Ok(Some(Candidate::typed(
            cell(row, DATE_COL),
            DATE_FORMAT,
            row.get(DESCRIPTION_COL).cloned().unwrap_or_default(),
            amount,
            transaction_type,
        )))
    }
}

impl Default for TabBankParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for TabBankParser {
    fn grammar(&self) -> Grammar {
        Grammar::TabBank
    }

    fn kind(&self) -> StatementKind {
        StatementKind::BankAccount
    }

    fn layout(&self) -> Layout {
        Layout::Delimited {
            extension: "txt",
            delimiter: b'\t',
        }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        let SourceContent::Rows(rows) = &doc.content else {
            return Err(IngestError::UnexpectedContent { expected: "row" });
        };
        let Some(header) = header_index(rows) else {
            return Ok(Vec::new());
        };
        parse_rows(doc, header + 1, |row| self.parse_row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbook_core::{canonicalize, TransactionType};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_row_after_header() {
        let doc = SourceDocument::rows(
            "sbi.txt",
            vec![
                row(&["Txn Date", "Value Date", "Description", "Ref No./Cheque No.", "Debit", "Credit", "Balance"]),
                row(&["02 Apr 2024", "02 Apr 2024", "ATM WDL", "ATM123", "2,000.00", " ", "8,000.00"]),
                row(&["03 Apr 2024", "03 Apr 2024", "BY TRANSFER", "NEFT9", " ", "1,500.00", "9,500.00"]),
            ],
        );
        let recs: Vec<_> = TabBankParser::new()
            .parse(&doc)
            .unwrap()
            .into_iter()
            .map(|c| canonicalize(c, "sbi_bank").unwrap())
            .collect();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].display_date(), "02-04-2024");
        assert_eq!(recs[0].display_amount(), "2000.00");
        assert_eq!(recs[0].transaction_type, TransactionType::Debit);
        assert_eq!(recs[1].display_amount(), "1500.00");
        assert_eq!(recs[1].transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_leading_blank_line_is_not_the_header() {
        let doc = SourceDocument::rows(
            "sbi.txt",
            vec![
                Vec::new(),
                row(&["Txn Date", "Value Date", "Description", "Ref No./Cheque No.", "Debit", "Credit", "Balance"]),
                row(&["02 Apr 2024", "02 Apr 2024", "ATM WDL", "ATM123", "2,000.00", " ", "8,000.00"]),
            ],
        );
        let cands = TabBankParser::new().parse(&doc).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].unit, 3);
    }

    #[test]
    fn test_both_blank_is_invalid() {
        let err = TabBankParser::new()
            .parse_row(&row(&["02 Apr 2024", "02 Apr 2024", "ODD", "R", " ", " ", "1.00"]))
            .unwrap_err();
        assert!(matches!(err, IngestError::AmbiguousPolarity { .. }));
    }
}
