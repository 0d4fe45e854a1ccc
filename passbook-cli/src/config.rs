use anyhow::{bail, Context, Result};
use passbook_ingest::{ParserRegistry, SourceSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "passbook.toml";

/// `passbook.toml` as written on disk. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Added to, or replacing by name, the built-in sources
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// Resolved settings handed to the pipeline.
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub registry: ParserRegistry,
    /// Source name to document passphrase
    pub passphrases: HashMap<String, String>,
}

impl Config {
    pub fn passphrase(&self, source: &str) -> Option<&str> {
        self.passphrases.get(source).map(String::as_str)
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Read the config file. An explicitly named file must exist; the default one may be absent.
pub fn load_file(path: Option<&Path>) -> Result<FileConfig> {
    let (p, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if !p.exists() {
        if explicit {
            bail!("config not found: {}", p.display());
        }
        return Ok(FileConfig::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

/// Merge file, flags and environment into a `Config`.
pub fn resolve(file: FileConfig, overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Config {
    let mut registry = ParserRegistry::new();
    for spec in file.sources {
        registry.register(spec);
    }

    let mut passphrases = HashMap::new();
    for spec in registry.sources() {
        let Some(var) = &spec.passphrase_env else { continue };
        match env(var) {
            Some(value) => {
                passphrases.insert(spec.name.clone(), value);
            }
            None => debug!(source = %spec.name, var = %var, "no passphrase set"),
        }
    }

    Config {
        data_dir: overrides
            .data_dir
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from("data")),
        output_dir: overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from("processed")),
        registry,
        passphrases,
    }
}

/// Write a starter `passbook.toml` listing the built-in sources.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    let cfg = FileConfig {
        data_dir: Some(PathBuf::from("data")),
        output_dir: Some(PathBuf::from("processed")),
        sources: ParserRegistry::new().sources().to_vec(),
    };
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
