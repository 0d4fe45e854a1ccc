//! Source table: which institution directory is read with which grammar.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parsers::Grammar;

/// One configured institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Institution directory name; also the `source_name` column of every record
    pub name: String,
    pub grammar: Grammar,
    /// Directory below the institution directory that holds the files
    #[serde(default)]
    pub subdir: Option<String>,
    /// Environment variable holding the document passphrase
    #[serde(default)]
    pub passphrase_env: Option<String>,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, grammar: Grammar) -> Self {
        SourceSpec {
            name: name.into(),
            grammar,
            subdir: None,
            passphrase_env: None,
        }
    }

    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    pub fn with_passphrase_env(mut self, var: impl Into<String>) -> Self {
        self.passphrase_env = Some(var.into());
        self
    }

    /// Directory scanned for this source's files.
    pub fn input_dir(&self, data_dir: &Path) -> PathBuf {
        let dir = data_dir.join(&self.name);
        match &self.subdir {
            Some(sub) => dir.join(sub),
            None => dir,
        }
    }
}

/// Ordered source table with name lookup. Registration order is run order.
pub struct ParserRegistry {
    sources: Vec<SourceSpec>,
}

impl ParserRegistry {
    /// Registry with every built-in institution.
    pub fn new() -> Self {
        let sources = vec![
            SourceSpec::new("idfc_wow", Grammar::TrailingMarker).with_passphrase_env("IDFC_WOW_PDF_PASSWORD"),
            SourceSpec::new("axis_bank", Grammar::DebitCreditColumns),
            SourceSpec::new("axis_flipkart", Grammar::CardSummarySheet),
            SourceSpec::new("axis_my_zone", Grammar::CardSummarySheet),
            SourceSpec::new("hdfc_bank", Grammar::CommaText),
            SourceSpec::new("hdfc_rupay", Grammar::CardDocument),
            SourceSpec::new("hdfc_diners", Grammar::CardDocument),
            SourceSpec::new("amex", Grammar::SignedCsv),
            SourceSpec::new("onecard", Grammar::SignedText).with_subdir("manual_processed"),
            SourceSpec::new("jupiter", Grammar::WalletDocument).with_passphrase_env("JUPITER_PDF_PASSWORD"),
            SourceSpec::new("icici_amazon", Grammar::MerchantCsv),
            SourceSpec::new("sbi_bank", Grammar::TabBank).with_subdir("manual_processed"),
        ];
        ParserRegistry { sources }
    }

    /// Add a source, replacing any existing entry with the same name in place.
    pub fn register(&mut self, spec: SourceSpec) {
        match self.sources.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.sources.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
