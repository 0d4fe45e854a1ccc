//! Card statement document with a trailing credit marker.
//!
//! Expected text rows after PDF-to-text:
//!   12/03/2023 SWIGGY BANGALORE 450.00
//!   14/03/2023 PAYMENT RECEIVED 12,000.00 CR
//!
//! A trailing `CR` marks a credit and pushes the amount one token left.

use passbook_core::{Candidate, IngestError, TransactionType};

use super::{leading_dmy_slash, looks_like_amount, parse_lines, Grammar, StatementParser};
use crate::types::{Layout, SourceDocument, StatementKind};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Where the amount sits and what type the line is, given its tokens and the
/// issuer's credit marker. `None` when there are too few tokens to hold
/// date, amount and (for credits) the marker.
pub(crate) fn split_trailing_marker<'a>(
    parts: &[&'a str],
    marker: &str,
) -> Option<(&'a str, TransactionType, usize)> {
    let last = *parts.last()?;
    if last == marker {
        if parts.len() < 3 {
            return None;
        }
        let idx = parts.len() - 2;
        Some((parts[idx], TransactionType::Credit, idx))
    } else {
        if parts.len() < 2 {
            return None;
        }
        let idx = parts.len() - 1;
        Some((parts[idx], TransactionType::Debit, idx))
    }
}

pub struct TrailingMarkerParser {
    marker: &'static str,
}

impl TrailingMarkerParser {
    pub fn new() -> Self {
        TrailingMarkerParser { marker: "CR" }
    }

    pub fn parse_line(&self, line: &str) -> Result<Option<Candidate>, IngestError> {
        let line = line.trim();
        if !leading_dmy_slash().is_match(line) {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((amount, transaction_type, amount_idx)) = split_trailing_marker(&parts, self.marker) else {
            return Ok(None);
        };
        if !looks_like_amount(amount) {
            return Ok(None);
        }

        Ok(Some(Candidate::typed(
            parts[0],
            DATE_FORMAT,
            parts[1..amount_idx].join(" "),
            amount,
            transaction_type,
        )))
    }
}

impl Default for TrailingMarkerParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for TrailingMarkerParser {
    fn grammar(&self) -> Grammar {
        Grammar::TrailingMarker
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
