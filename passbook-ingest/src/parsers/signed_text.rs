//! Manually pre-processed card statement text, one transaction per line.
//!
//!   03-Feb-2024 SWIGGY BANGALORE Food 1,234.50
//!   05-Feb-2024 REPAYMENT RECEIVED Payment -5,000.00
//!
//! Tokens are single-space separated. The second-to-last token is a category
//! column and is dropped; the last token is a signed amount.

use passbook_core::{Candidate, IngestError};

use super::{parse_lines, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d-%b-%Y";

pub struct SignedTextParser;

impl SignedTextParser {
    pub fn new() -> Self {
        SignedTextParser
    }

    pub fn parse_line(&self, line: &str) -> Result<Option<Candidate>, IngestError> {
        let parts: Vec<&str> = line.trim().split(' ').collect();
        if parts.len() <= 2 {
            return Ok(None);
        }

        let last = parts.len() - 1;
        Ok(Some(Candidate::signed(
            parts[0],
            DATE_FORMAT,
            parts[1..last - 1].join(" "),
            parts[last],
        )))
    }
}

impl Default for SignedTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for SignedTextParser {
    fn grammar(&self) -> Grammar {
        Grammar::SignedText
    }

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn layout(&self) -> Layout {
        Layout::Text { extension: "txt" }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        parse_lines(doc, 0, |line| self.parse_line(line))
    }
}
