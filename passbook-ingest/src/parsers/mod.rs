//! Institution grammars.
//!
//! Each grammar turns the units (lines or rows) of one decoded file into
//! candidates. A unit that does not look like a transaction yields nothing;
//! only a unit that matches but carries an impossible value combination is an
//! error, and that error carries the file and unit number.

use passbook_core::{Candidate, IngestError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::trace;

use crate::types::{Layout, SourceContent, SourceDocument, StatementKind};

pub mod card_document;
pub mod card_summary_sheet;
pub mod comma_text;
pub mod debit_credit_columns;
pub mod merchant_csv;
pub mod signed_csv;
pub mod signed_text;
pub mod tab_bank;
pub mod trailing_marker;
pub mod wallet_document;

pub use card_document::CardDocumentParser;
pub use card_summary_sheet::CardSummarySheetParser;
pub use comma_text::CommaTextParser;
pub use debit_credit_columns::DebitCreditColumnsParser;
pub use merchant_csv::{MerchantCardRow, MerchantCsvParser};
pub use signed_csv::SignedCsvParser;
pub use signed_text::SignedTextParser;
pub use tab_bank::TabBankParser;
pub use trailing_marker::TrailingMarkerParser;
pub use wallet_document::WalletDocumentParser;

/// One statement grammar.
pub trait StatementParser: Send + Sync {
    fn grammar(&self) -> Grammar;

    fn kind(&self) -> StatementKind;

    /// Which files this grammar reads and how they are decoded.
    fn layout(&self) -> Layout;

    /// Parse a decoded file into candidates, preserving unit order.
    fn parse(&self, doc: &SourceDocument) -> Result<Vec<Candidate>, IngestError>;
}

/// Declares `Grammar` (serde name, `name()`, `ALL`, factory) from one table of
/// variant, config name and parser.
macro_rules! grammars {
    ($($variant:ident => $name:literal, $parser:ident;)+) => {
        /// Every grammar the workspace knows, selectable by name in `passbook.toml`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Grammar {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Grammar {
            pub const ALL: &'static [Grammar] = &[$(Grammar::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Grammar::$variant => $name,)+
                }
            }

            /// Factory: the parser implementing this grammar.
            pub fn parser(&self) -> Box<dyn StatementParser> {
                match self {
                    $(Grammar::$variant => Box::new($parser::new()),)+
                }
            }
        }
    };
}

grammars! {
    TrailingMarker => "trailing-marker", TrailingMarkerParser;
    DebitCreditColumns => "debit-credit-columns", DebitCreditColumnsParser;
    CardSummarySheet => "card-summary-sheet", CardSummarySheetParser;
    CommaText => "comma-text", CommaTextParser;
    CardDocument => "card-document", CardDocumentParser;
    SignedCsv => "signed-csv", SignedCsvParser;
    SignedText => "signed-text", SignedTextParser;
    WalletDocument => "wallet-document", WalletDocumentParser;
    MerchantCsv => "merchant-csv", MerchantCsvParser;
    TabBank => "tab-bank", TabBankParser;
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Grammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::ALL.iter().copied().find(|g| g.name() == s).ok_or_else(|| {
            let known: Vec<_> = Grammar::ALL.iter().map(|g| g.name()).collect();
            format!("unknown grammar '{s}' (expected one of: {})", known.join(", "))
        })
    }
}

/// Run `parse` over every line after the first `skip`, attaching file and
/// line number to any error.
pub(crate) fn parse_lines<F>(doc: &SourceDocument, skip: usize, mut parse: F) -> Result<Vec<Candidate>, IngestError>
where
    F: FnMut(&str) -> Result<Option<Candidate>, IngestError>,
{
    let SourceContent::Lines(lines) = &doc.content else {
        return Err(IngestError::UnexpectedContent { expected: "line" });
    };

    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(skip) {
        match parse(line).map_err(|e| e.at(&doc.path, idx + 1))? {
            Some(candidate) => out.push(candidate.at_unit(idx + 1)),
            None => trace!(line = idx + 1, "unrecognized line"),
        }
    }
    Ok(out)
}

/// Row counterpart of [`parse_lines`].
pub(crate) fn parse_rows<F>(doc: &SourceDocument, skip: usize, mut parse: F) -> Result<Vec<Candidate>, IngestError>
where
    F: FnMut(&[String]) -> Result<Option<Candidate>, IngestError>,
{
    let SourceContent::Rows(rows) = &doc.content else {
        return Err(IngestError::UnexpectedContent { expected: "row" });
    };

    let mut out = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(skip) {
        match parse(row).map_err(|e| e.at(&doc.path, idx + 1))? {
            Some(candidate) => out.push(candidate.at_unit(idx + 1)),
            None => trace!(row = idx + 1, "unrecognized row"),
        }
    }
    Ok(out)
}

/// Index of the first row with any non-blank cell; the column header of a
/// header-first export.
pub(crate) fn header_index(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter().position(|row| row.iter().any(|c| !c.trim().is_empty()))
}

/// `dd/mm/yyyy` at the start of a line.
pub(crate) fn leading_dmy_slash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}").expect("invalid leading date regex"))
}

/// Plain numeric amount token, optionally signed, with thousands separators.
pub(crate) fn looks_like_amount(token: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[\d,]*\d(\.\d+)?$").expect("invalid amount regex"))
        .is_match(token)
}

/// Trimmed cell `idx`, empty when the row is short.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}
