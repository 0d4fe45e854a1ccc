//! Credit-card statement document whose extracted lines carry issuer boilerplate.
//!
//! Expected text rows after PDF-to-text:
//!   15/03/2024 13:45:10 ZOMATO GURGAON 1,250.00 HDFC BANK UPI RuPay Credit Card Statement
//!   20/03/2024 NETBANKING TRANSFER 15,000.00 Cr
//!
//! The statement title leaks into transaction lines and is removed first; a
//! leading hh:mm:ss timestamp is dropped from the description.

use passbook_core::{Candidate, IngestError};
use regex::Regex;
use std::sync::OnceLock;

use super::trailing_marker::split_trailing_marker;
use super::{leading_dmy_slash, looks_like_amount, parse_lines, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d/%m/%Y";
const CREDIT_MARKER: &str = "Cr";
const MIN_TOKENS: usize = 4;

const BOILERPLATE: [&str; 2] = [
    " HDFC BANK UPI RuPay Credit Card Statement",
    " Diners Club International Credit Card Statement",
];

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}:\d{2}\s*").expect("invalid timestamp regex"))
}

pub struct CardDocumentParser;

impl CardDocumentParser {
    pub fn new() -> Self {
        CardDocumentParser
    }

    pub fn parse_line(&self, line: &str) -> Result<Option<Candidate>, IngestError> {
        let line = line.trim();
        if !leading_dmy_slash().is_match(line) {
            return Ok(None);
        }

        let mut cleaned = line.to_string();
        for suffix in BOILERPLATE {
            cleaned = cleaned.replace(suffix, "");
        }

        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        if parts.len() < MIN_TOKENS {
            return Ok(None);
        }

        let Some((amount, transaction_type, amount_idx)) = split_trailing_marker(&parts, CREDIT_MARKER) else {
            return Ok(None);
        };
        if !looks_like_amount(amount) {
            return Ok(None);
        }

        let description = parts[1..amount_idx].join(" ");
        let description = timestamp_re().replace(&description, "");

        Ok(Some(Candidate::typed(
            parts[0],
            DATE_FORMAT,
            description.into_owned(),
            amount,
            transaction_type,
        )))
    }
}

impl Default for CardDocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for CardDocumentParser {
    fn grammar(&self) -> Grammar {
        Grammar::CardDocument
    }

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn layout(&self) -> Layout {
        Layout::Document { extension: "pdf" }
    }

    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError> {
        parse_lines(doc, 0, |line| self.parse_line(line))
    }
}
