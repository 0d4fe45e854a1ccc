//! Bank statement delimited text export (fixed seven-column layout).
//!
//! Expected rows:
//!   Date     ,Narration                 ,Value Dat,Debit Amount ,Credit Amount,Chq/Ref Number ,Closing Balance
//!   01/04/24 ,UPI-SWIGGY-SWIGGY@ICICI    ,01/04/24 ,450.00       ,0.00         ,0000409112345  ,9550.00
//!
//! Both amount columns are always present; the strictly positive one wins.

use passbook_core::{parse_amount, Candidate, IngestError, TransactionType};
use regex::Regex;
use std::sync::OnceLock;

use super::{parse_lines, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const COLUMN_COUNT: usize = 7;
const DATE_FORMAT: &str = "%d/%m/%y";

const DATE_COL: usize = 0;
const DESCRIPTION_COL: usize = 1;
const DEBIT_COL: usize = 3;
const CREDIT_COL: usize = 4;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{2}$").expect("invalid dd/mm/yy regex"))
}

pub struct CommaTextParser;

impl CommaTextParser {
    pub fn new() -> Self {
        CommaTextParser
    }

    pub fn parse_line(&self, line: &str) -> Result<Option<Candidate>, IngestError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if fields.len() != COLUMN_COUNT || !date_re().is_match(fields[DATE_COL]) {
            return Ok(None);
        }

        let debit = fields[DEBIT_COL];
        let credit = fields[CREDIT_COL];
        let (amount, transaction_type) = match (parse_amount(debit)? > 0, parse_amount(credit)? > 0) {
            (true, false) => (debit, TransactionType::Debit),
            (false, true) => (credit, TransactionType::Credit),
            _ => {
                return Err(IngestError::AmbiguousPolarity {
                    debit: debit.to_string(),
                    credit: credit.to_string(),
                });
            }
        };

        Ok(Some(Candidate::typed(
            fields[DATE_COL],
            DATE_FORMAT,
            fields[DESCRIPTION_COL],
            amount,
            transaction_type,
        )))
    }
}

impl Default for CommaTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for CommaTextParser {
    fn grammar(&self) -> Grammar {
        Grammar::CommaText
    }

    fn kind(&self) -> StatementKind {
        StatementKind::BankAccount
    }

    fn layout(&self) -> Layout {
        Layout::Text { extension: "txt" }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        parse_lines(doc, 0, |line| self.parse_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbook_core::canonicalize;

    #[test]
    fn test_positive_debit() {
        let c = CommaTextParser::new()
            .parse_line(" 01/04/24 ,UPI-SWIGGY ,01/04/24 ,450.00 ,0.00 ,0000409112345 ,9550.00 ")
            .unwrap()
            .unwrap();
        let rec = canonicalize(c, "hdfc_bank").unwrap();
        assert_eq!(rec.display_date(), "01-04-2024");
        assert_eq!(rec.description, "UPI-SWIGGY");
        assert_eq!(rec.display_amount(), "450.00");
        assert_eq!(rec.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_positive_credit() {
        let c = CommaTextParser::new()
            .parse_line("30/04/24,NEFT CR-SALARY,30/04/24,0.00,85000.00,N1234,94550.00")
            .unwrap()
            .unwrap();
        let rec = canonicalize(c, "hdfc_bank").unwrap();
        assert_eq!(rec.display_amount(), "85000.00");
        assert_eq!(rec.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_neither_positive_is_invalid() {
        let err = CommaTextParser::new()
            .parse_line("30/04/24,ODD,30/04/24,0.00,0.00,N1234,94550.00")
            .unwrap_err();
        assert!(matches!(err, IngestError::AmbiguousPolarity { .. }));
    }

    #[test]
    fn test_wrong_shape_is_skipped() {
        let parser = CommaTextParser::new();
        assert!(parser.parse_line("Date,Narration,Value Dat,Debit Amount,Credit Amount,Chq/Ref Number,Closing Balance").unwrap().is_none());
        assert!(parser.parse_line("01/04/24,TOO,FEW").unwrap().is_none());
        assert!(parser.parse_line("01/04/2024,A,01/04/24,1.00,0.00,X,1.00").unwrap().is_none());
    }
}
