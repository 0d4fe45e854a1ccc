use std::fmt;
use std::path::PathBuf;

/// What kind of account a grammar's statements belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    CreditCard,
    BankAccount,
    Wallet,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::CreditCard => "credit card",
            StatementKind::BankAccount => "bank account",
            StatementKind::Wallet => "wallet",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How files for a grammar are found and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Plain text, one unit per line
    Text { extension: &'static str },
    /// Delimited export, one unit per row
    Delimited {
        extension: &'static str,
        delimiter: u8,
    },
    /// Text-bearing document (PDF), one unit per extracted line; may be encrypted
    Document { extension: &'static str },
    /// Workbook, one unit per row of the named sheet
    Spreadsheet {
        extension: &'static str,
        sheet: &'static str,
    },
}

impl Layout {
    pub fn extension(&self) -> &'static str {
        match self {
            Layout::Text { extension }
            | Layout::Delimited { extension, .. }
            | Layout::Document { extension }
            | Layout::Spreadsheet { extension, .. } => extension,
        }
    }
}

/// Raw content extracted from one file, in reader order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Lines(Vec<String>),
    Rows(Vec<Vec<String>>),
}

/// A file plus its extracted content. Consumed once by one grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: SourceContent,
}

impl SourceDocument {
    pub fn lines(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        SourceDocument {
            path: path.into(),
            content: SourceContent::Lines(lines),
        }
    }

    pub fn rows(path: impl Into<PathBuf>, rows: Vec<Vec<String>>) -> Self {
        SourceDocument {
            path: path.into(),
            content: SourceContent::Rows(rows),
        }
    }

    /// Build a line document from a text block (tests and fixtures).
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self::lines(path, text.lines().map(str::to_string).collect())
    }
}
