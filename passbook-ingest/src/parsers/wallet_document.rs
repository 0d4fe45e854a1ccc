//! Digital-wallet statement document.
//!
//! Each transaction spans two extracted lines: the date, then a line opening
//! with the time that carries description and amount.
//!   14 Mar 2024
//!   10:32 PM UPI/SWIGGY/409112 Rs. 432.00
//!   15 Mar 2024
//!   09:01 AM Repayment - Thank You Rs. 5,000.00
//!
//! Refunds and repayments are credits; everything else is a debit.

use passbook_core::{Candidate, IngestError, TransactionType};
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use super::{Grammar, StatementParser};
use crate::types::{Layout, SourceContent, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d %b %Y";
const CURRENCY_PREFIX: &str = "Rs. ";
const CREDIT_KEYWORDS: [&str; 2] = ["REFUND", "Repayment - Thank You"];
/// Width of the meridiem marker that follows the time token.
const MERIDIEM_WIDTH: usize = 2;

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}").expect("invalid time marker regex"))
}

pub struct WalletDocumentParser;

impl WalletDocumentParser {
    pub fn new() -> Self {
        WalletDocumentParser
    }

    /// Parse a time-marker `line` using the date held by the line before it.
    pub fn parse_entry(&self, date_line: &str, line: &str) -> Result<Option<Candidate>, IngestError> {
        if !time_re().is_match(line) {
            return Ok(None);
        }

        let formatted = line.replace(CURRENCY_PREFIX, "");
        let parts: Vec<&str> = formatted.split(' ').collect();
        if parts.len() < 3 {
            return Ok(None);
        }

        let last = parts.len() - 1;
        let description: String = parts[1..last].join(" ").chars().skip(MERIDIEM_WIDTH).collect();

        let transaction_type = if CREDIT_KEYWORDS.iter().any(|k| formatted.contains(k)) {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        };

        Ok(Some(Candidate::typed(
            date_line.trim(),
            DATE_FORMAT,
            description.trim(),
            parts[last],
            transaction_type,
        )))
    }
}

impl Default for WalletDocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for WalletDocumentParser {
    fn grammar(&self) -> Grammar {
        Grammar::WalletDocument
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Wallet
    }

    fn layout(&self) -> Layout {
        Layout::Document { extension: "pdf" }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        let SourceContent::Lines(lines) = &doc.content else {
            return Err(IngestError::UnexpectedContent { expected: "line" });
        };

        let mut out = Vec::new();
        for (idx, pair) in lines.windows(2).enumerate() {
            let unit = idx + 2;
            match self.parse_entry(&pair[0], &pair[1]).map_err(|e| e.at(&doc.path, unit))? {
                Some(candidate) => out.push(candidate.at_unit(unit)),
                None => trace!(line = unit, "unrecognized line"),
            }
        }
        Ok(out)
    }
}
