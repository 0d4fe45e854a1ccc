//! Decoding raw statement files into lines or rows.
//!
//! PDF and XLSX support sit behind the `pdf` and `xlsx` features; without
//! them such files fail to decode and the pipeline skips them.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::{Layout, SourceContent};

/// Turns one file into the content its grammar consumes.
pub trait SourceReader {
    fn read(&self, path: &Path, layout: &Layout, passphrase: Option<&str>) -> Result<SourceContent>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceReader;

impl FsSourceReader {
    pub fn new() -> Self {
        FsSourceReader
    }
}

impl SourceReader for FsSourceReader {
    fn read(&self, path: &Path, layout: &Layout, passphrase: Option<&str>) -> Result<SourceContent> {
        match layout {
            Layout::Text { .. } => read_text(path),
            Layout::Delimited { delimiter, .. } => read_delimited(path, *delimiter),
            Layout::Document { .. } => read_document(path, passphrase),
            Layout::Spreadsheet { sheet, .. } => read_sheet(path, sheet),
        }
    }
}

fn read_text(path: &Path) -> Result<SourceContent> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(SourceContent::Lines(text.lines().map(str::to_string).collect()))
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<SourceContent> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    // csv drops blank lines; keep them as empty rows so row n is physical line n
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.with_context(|| format!("decoding {}", path.display()))?;
        if let Some(pos) = record.position() {
            while (rows.len() as u64) + 1 < pos.line() {
                rows.push(Vec::new());
            }
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(SourceContent::Rows(rows))
}

#[cfg(feature = "pdf")]
fn read_document(path: &Path, passphrase: Option<&str>) -> Result<SourceContent> {
    let text = match passphrase {
        Some(pw) => pdf_extract::extract_text_encrypted(path, pw),
        None => pdf_extract::extract_text(path),
    }
    .map_err(|e| anyhow::anyhow!("extracting text from {}: {e}", path.display()))?;

    // page breaks arrive as form feeds
    Ok(SourceContent::Lines(
        text.split(['\n', '\u{000C}']).map(str::to_string).collect(),
    ))
}

#[cfg(not(feature = "pdf"))]
fn read_document(path: &Path, _passphrase: Option<&str>) -> Result<SourceContent> {
    anyhow::bail!("cannot decode {}: built without the `pdf` feature", path.display())
}

#[cfg(feature = "xlsx")]
fn read_sheet(path: &Path, sheet: &str) -> Result<SourceContent> {
    use calamine::{open_workbook_auto, Reader};

    let mut workbook = open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("reading sheet '{sheet}' of {}", path.display()))?;

    Ok(SourceContent::Rows(
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    ))
}

#[cfg(not(feature = "xlsx"))]
fn read_sheet(path: &Path, _sheet: &str) -> Result<SourceContent> {
    anyhow::bail!("cannot decode {}: built without the `xlsx` feature", path.display())
}

/// Every file below `dir` with the given extension (case-insensitive), sorted by path.
/// A missing directory yields no files; unreadable directories are skipped with a warning.
pub fn discover_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if dir.is_dir() {
        walk(dir, extension, &mut out);
    }
    out.sort();
    out
}

fn walk(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if path.is_dir() {
            walk(&path, extension, out);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        {
            out.push(path);
        }
    }
}
