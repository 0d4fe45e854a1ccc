use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use passbook_ingest::{ingest_source, FsSourceReader, SourceBatch, SourceSpec, StatementParser};
use passbook_ledger::{merge_tables, source_table_path, write_ledger, write_unified, UNIFIED_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing::error;

mod config;
mod logging;

use config::{Config, Overrides};

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Normalize bank and card statements into one ledger")]
struct Cli {
    /// Config file (default: ./passbook.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the per-institution statement directories
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Where ledger tables are written
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest every configured source, then build the unified ledger
    Run {
        /// Merge even when some sources failed
        #[arg(long)]
        keep_going: bool,
    },

    /// Ingest a single source
    Source { name: String },

    /// Rebuild the unified ledger from existing per-source tables
    Merge,

    /// List configured sources and their grammars
    Sources,

    /// Write a starter passbook.toml
    Init,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let overrides = Overrides {
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
    };

    match cli.command {
        Command::Init => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
            config::init_config(&path)?;
        }
        Command::Run { keep_going } => run_all(&load(cli.config.as_deref(), overrides)?, keep_going)?,
        Command::Source { name } => {
            let cfg = load(cli.config.as_deref(), overrides)?;
            let spec = cfg
                .registry
                .get(&name)
                .with_context(|| format!("unknown source '{name}' (see `passbook sources`)"))?;
            let batch = run_source(&cfg, spec)?;
            print_stats(&batch);
        }
        Command::Merge => merge(&load(cli.config.as_deref(), overrides)?)?,
        Command::Sources => {
            let cfg = load(cli.config.as_deref(), overrides)?;
            for spec in cfg.registry.sources() {
                println!(
                    "{:<14} {:<22} {:<14} {}",
                    spec.name,
                    spec.grammar,
                    spec.grammar.parser().kind(),
                    spec.input_dir(&cfg.data_dir).display()
                );
            }
        }
    }

    Ok(())
}

fn load(path: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let file = config::load_file(path)?;
    Ok(config::resolve(file, overrides, |var| std::env::var(var).ok()))
}

/// Ingest one source and write its table. Nothing is written on failure.
fn run_source(cfg: &Config, spec: &SourceSpec) -> Result<SourceBatch> {
    let batch = ingest_source(&FsSourceReader::new(), spec, &cfg.data_dir, cfg.passphrase(&spec.name))
        .with_context(|| format!("source {}", spec.name))?;
    let path = source_table_path(&cfg.output_dir, &spec.name);
    write_ledger(&batch.ledger, &path)?;
    Ok(batch)
}

fn run_all(cfg: &Config, keep_going: bool) -> Result<()> {
    let mut failed = Vec::new();
    for spec in cfg.registry.sources() {
        match run_source(cfg, spec) {
            Ok(batch) => print_stats(&batch),
            Err(e) => {
                error!("{e:#}");
                println!("{:<14} FAILED", spec.name);
                failed.push(spec.name.clone());
            }
        }
    }

    if !failed.is_empty() && !keep_going {
        bail!(
            "{} source(s) failed ({}); unified ledger not rebuilt (pass --keep-going to merge anyway)",
            failed.len(),
            failed.join(", ")
        );
    }

    merge(cfg)?;

    if !failed.is_empty() {
        bail!("{} source(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn merge(cfg: &Config) -> Result<()> {
    let tables: Vec<PathBuf> = cfg
        .registry
        .sources()
        .iter()
        .map(|s| source_table_path(&cfg.output_dir, &s.name))
        .collect();
    let merged = merge_tables(&tables)?;

    let path = cfg.output_dir.join(UNIFIED_FILE_NAME);
    write_unified(&merged, &path)?;
    println!(
        "Wrote {} ({} rows, {} duplicates dropped)",
        path.display(),
        merged.rows.len(),
        merged.duplicates_dropped
    );
    Ok(())
}

fn print_stats(batch: &SourceBatch) {
    let stats = &batch.stats;
    let (credits, debits) = batch.ledger.totals();
    println!(
        "{:<14} files={} skipped={} records={} credits={} debits={}",
        batch.source, stats.files_seen, stats.files_skipped, stats.records, credits, debits
    );
}
