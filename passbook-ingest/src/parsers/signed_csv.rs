//! Pre-cleaned card CSV export with a header row and one signed amount column.
//!
//!   Date,Description,Card Member,Account #,Amount
//!   12/03/2024,UBER INDIA,A MEMBER,-21004,245.00
//!   15/03/2024,PAYMENT RECEIVED. THANK YOU,A MEMBER,-21004,-10000.00
//!
//! Only Date, Description and Amount are kept; columns are located by header name.

use passbook_core::{Candidate, IngestError};

use super::{cell, header_index, parse_rows, Grammar, StatementParser};
use crate::types::{Layout, SourceContent, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, IngestError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(IngestError::MissingColumn { column: name })
        };
        Ok(Columns {
            date: find("Date")?,
            description: find("Description")?,
            amount: find("Amount")?,
        })
    }
}

pub struct SignedCsvParser;

impl SignedCsvParser {
    pub fn new() -> Self {
        SignedCsvParser
    }

    fn parse_row(&self, columns: Columns, row: &[String]) -> Result<Option<Candidate>, IngestError> {
        let date = cell(row, columns.date);
        if date.is_empty() {
            return Ok(None);
        }
        Ok(Some(Candidate::signed(
            date,
            DATE_FORMAT,
            row.get(columns.description).cloned().unwrap_or_default(),
            cell(row, columns.amount),
        )))
    }
}

impl Default for SignedCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for SignedCsvParser {
    fn grammar(&self) -> Grammar {
        Grammar::SignedCsv
    }

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn layout(&self) -> Layout {
        Layout::Delimited {
            extension: "csv",
            delimiter: b',',
        }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        let SourceContent::Rows(rows) = &doc.content else {
            return Err(IngestError::UnexpectedContent { expected: "row" });
        };
        let Some(at) = header_index(rows) else {
            return Ok(Vec::new());
        };
        let columns = Columns::from_header(&rows[at]).map_err(|e| e.at(&doc.path, at + 1))?;

        parse_rows(doc, at + 1, |row| self.parse_row(columns, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbook_core::{canonicalize, TransactionType};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn doc(rows: Vec<Vec<String>>) -> SourceDocument {
        SourceDocument::rows("amex/activity.csv", rows)
    }

    #[test]
    fn test_sign_decides_type() {
        let d = doc(vec![
            row(&["Date", "Description", "Card Member", "Account #", "Amount"]),
            row(&["12/03/2024", "UBER INDIA", "A MEMBER", "-21004", "245.00"]),
            row(&["15/03/2024", "PAYMENT RECEIVED. THANK YOU", "A MEMBER", "-21004", "-10000.00"]),
        ]);
        let recs: Vec<_> = SignedCsvParser::new()
            .parse(&d)
            .unwrap()
            .into_iter()
            .map(|c| canonicalize(c, "amex").unwrap())
            .collect();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].display_date(), "12-03-2024");
        assert_eq!(recs[0].transaction_type, TransactionType::Debit);
        assert_eq!(recs[0].display_amount(), "245.00");
        assert_eq!(recs[1].transaction_type, TransactionType::Credit);
        assert_eq!(recs[1].display_amount(), "10000.00");
    }

    #[test]
    fn test_columns_found_by_name() {
        let d = doc(vec![
            row(&["Amount", "Reference", "Date", "Description"]),
            row(&["99.00", "R1", "01/02/2024", "NETFLIX"]),
        ]);
        let cands = SignedCsvParser::new().parse(&d).unwrap();
        assert_eq!(cands[0].description, "NETFLIX");
        assert_eq!(cands[0].amount, "99.00");
        assert_eq!(cands[0].date, "01/02/2024");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let d = doc(vec![row(&["Date", "Description"]), row(&["01/02/2024", "NETFLIX"])]);
        let err = SignedCsvParser::new().parse(&d).unwrap_err();
        assert!(err.to_string().contains("missing column 'Amount'"), "{err}");
    }

    #[test]
    fn test_header_after_blank_lines() {
        let d = doc(vec![
            Vec::new(),
            row(&["Date", "Description", "Amount"]),
            row(&["01/02/2024", "NETFLIX", "99.00"]),
        ]);
        let cands = SignedCsvParser::new().parse(&d).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].unit, 3);
    }

    #[test]
    fn test_empty_file_has_no_candidates() {
        assert!(SignedCsvParser::new().parse(&doc(Vec::new())).unwrap().is_empty());
    }
}
