//! Merchant co-branded card CSV, read line by line.
//!
//!   "Transaction Date","Details","Amount (INR)"...
//!   "12/03/2024","4711","AMAZON PAY INDIA","12","","1199.00",""
//!   "15/03/2024","4712","PAYMENT RECEIVED","0","","5000.00","CR"
//!
//! Fields: date, serial number, description, reward points, international
//! amount, amount, CR marker. Quoting is inconsistent across exports, so
//! quotes are dropped before splitting on commas.

use passbook_core::{Candidate, IngestError, TransactionType};

use super::{leading_dmy_slash, parse_lines, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d/%m/%Y";
const FIELD_COUNT: usize = 7;

/// All fields of one statement line. Reward points and the international
/// amount are informational and do not reach the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantCardRow {
    pub date: String,
    pub serial_no: String,
    pub description: String,
    pub reward_points: String,
    pub intl_amount: String,
    pub amount: String,
    pub marker: String,
}

impl MerchantCardRow {
    pub fn transaction_type(&self) -> TransactionType {
        if self.marker.trim() == "CR" {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        }
    }
}

pub struct MerchantCsvParser;

impl MerchantCsvParser {
    pub fn new() -> Self {
        MerchantCsvParser
    }

    pub fn parse_fields(&self, line: &str) -> Option<MerchantCardRow> {
        let cleaned = line.replace('"', "");
        let cleaned = cleaned.trim();
        if !leading_dmy_slash().is_match(cleaned) {
            return None;
        }

        let parts: Vec<&str> = cleaned.split(',').collect();
        if parts.len() < FIELD_COUNT {
            return None;
        }

        Some(MerchantCardRow {
            date: parts[0].to_string(),
            serial_no: parts[1].to_string(),
            description: parts[2].to_string(),
            reward_points: parts[3].to_string(),
            intl_amount: parts[4].to_string(),
            amount: parts[5].to_string(),
            marker: parts[6].to_string(),
        })
    }

    pub fn parse_line(&self, line: &str) -> Result<Option<Candidate>, IngestError> {
        Ok(self.parse_fields(line).map(|row| {
            let transaction_type = row.transaction_type();
            Candidate::typed(row.date, DATE_FORMAT, row.description, row.amount, transaction_type)
        }))
    }
}

impl Default for MerchantCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for MerchantCsvParser {
    fn grammar(&self) -> Grammar {
        Grammar::MerchantCsv
    }

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn layout(&self) -> Layout {
        Layout::Text { extension: "csv" }
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
    fn test_companion_fields_are_parsed() {
        let row = MerchantCsvParser::new()
            .parse_fields(r#""12/03/2024","4711","AMAZON PAY INDIA","12","","1199.00","""#)
            .unwrap();
        assert_eq!(row.serial_no, "4711");
        assert_eq!(row.reward_points, "12");
        assert_eq!(row.intl_amount, "");
        assert_eq!(row.transaction_type(), TransactionType::Debit);
    }

    #[test]
    fn test_cr_marker_and_canonical_output() {
        let c = MerchantCsvParser::new()
            .parse_line(r#""15/03/2024","4712","PAYMENT RECEIVED","0","","5000.00","CR""#)
            .unwrap()
            .unwrap();
        let rec = canonicalize(c, "icici_amazon").unwrap();
        assert_eq!(rec.display_date(), "15-03-2024");
        assert_eq!(rec.description, "PAYMENT RECEIVED");
        assert_eq!(rec.display_amount(), "5000.00");
        assert_eq!(rec.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_description_passes_through() {
        let c = MerchantCsvParser::new()
            .parse_line("12/03/2024,1, Amazon  Marketplace ,0,,10.00,")
            .unwrap()
            .unwrap();
        assert_eq!(c.description, " Amazon  Marketplace ");
    }

    #[test]
    fn test_header_and_short_lines_skipped() {
        let parser = MerchantCsvParser::new();
        assert!(parser.parse_line(r#""Transaction Date","Details""#).unwrap().is_none());
        assert!(parser.parse_line("12/03/2024,1,SHORT").unwrap().is_none());
    }
}
