//! Credit-card workbook export, sheet "Transactions Summary".
//!
//! Columns: Date, Transaction Details, (unused), Amount, Debit/Credit
//!   05 Jan '24 | FLIPKART INTERNET | | ₹ 2,499.00 | Debit
//!
//! The type column is an explicit label, validated during canonicalization.

use passbook_core::{Candidate, IngestError};
use regex::Regex;
use std::sync::OnceLock;

use super::{cell, parse_rows, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

pub const SHEET_NAME: &str = "Transactions Summary";
const DATE_FORMAT: &str = "%d %b '%y";

const DATE_COL: usize = 0;
const DESCRIPTION_COL: usize = 1;
const AMOUNT_COL: usize = 3;
const TYPE_COL: usize = 4;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2} [A-Za-z]{3} '\d{2}$").expect("invalid dd mmm 'yy regex"))
}

pub struct CardSummarySheetParser;

impl CardSummarySheetParser {
    pub fn new() -> Self {
        CardSummarySheetParser
    }

    pub fn parse_row(&self, row: &[String]) -> Result<Option<Candidate>, IngestError> {
        let date = cell(row, DATE_COL);
        if !date_re().is_match(date) {
            return Ok(None);
        }

        Ok(Some(Candidate::labelled(
            date,
            DATE_FORMAT,
            row.get(DESCRIPTION_COL).cloned().unwrap_or_default(),
            cell(row, AMOUNT_COL),
            cell(row, TYPE_COL),
        )))
    }
}

impl Default for CardSummarySheetParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for CardSummarySheetParser {
    fn grammar(&self) -> Grammar {
        Grammar::CardSummarySheet
    }

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn layout(&self) -> Layout {
        Layout::Spreadsheet {
            extension: "xlsx",
            sheet: SHEET_NAME,
        }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        parse_rows(doc, 0, |row| self.parse_row(row))
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
    fn test_reparses_two_digit_year() {
        let c = CardSummarySheetParser::new()
            .parse_row(&row(&["05 Jan '24", "FLIPKART INTERNET", "", "₹ 2,499.00", "Debit"]))
            .unwrap()
            .unwrap();
        let rec = canonicalize(c, "axis_flipkart").unwrap();
        assert_eq!(rec.display_date(), "05-01-2024");
        assert_eq!(rec.display_amount(), "2499.00");
        assert_eq!(rec.transaction_type, TransactionType::Debit);
        assert_eq!(rec.description, "FLIPKART INTERNET");
    }

    #[test]
    fn test_credit_label() {
        let c = CardSummarySheetParser::new()
            .parse_row(&row(&["18 Feb '24", "PAYMENT RECEIVED", "", "₹ 10,000.00", "credit"]))
            .unwrap()
            .unwrap();
        let rec = canonicalize(c, "axis_my_zone").unwrap();
        assert_eq!(rec.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_header_and_totals_are_skipped() {
        let doc = SourceDocument::rows(
            "axis.xlsx",
            vec![
                row(&["Date", "Transaction Details", "", "Amount", "Debit/Credit"]),
                row(&["05 Jan '24", "FLIPKART", "", "100.00", "Debit"]),
                row(&["Total", "", "", "100.00", ""]),
            ],
        );
        let cands = CardSummarySheetParser::new().parse(&doc).unwrap();
        assert_eq!(cands.len(), 1);
    }
}
