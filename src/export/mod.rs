pub mod csv;

pub use self::csv::{to_csv, CSV_HEADERS};

use crate::history::list;
use crate::store::KeyValueStore;
use crate::text::slug;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing stored for the facility
    NoData,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NoData => write!(f, "No data to export"),
        }
    }
}

impl std::error::Error for ExportError {}

/// A rendered CSV file, not yet written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
    pub rows: usize,
}

/// "nas_export_2026-10-19_clinica-alemana.csv"
pub fn export_file_name(facility: &str, date: NaiveDate) -> String {
    format!("nas_export_{}_{}.csv", date.format("%Y-%m-%d"), slug(facility))
}

/// Render the facility's history as CSV. Fails with [`ExportError::NoData`] when empty.
pub fn export_csv<S: KeyValueStore + ?Sized>(
    store: &S,
    facility: &str,
    date: NaiveDate,
) -> Result<CsvExport> {
    let records = list(store, facility)?;
    if records.is_empty() {
        return Err(ExportError::NoData.into());
    }

    Ok(CsvExport {
        file_name: export_file_name(facility, date),
        contents: to_csv(&records),
        rows: records.len(),
    })
}

/// Write the export into `dir` atomically, returning the file path
pub fn write_export(export: &CsvExport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(&export.file_name);
    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(export.contents.as_bytes())
        .context("Failed to write CSV export")?;
    file.commit().context("Failed to save CSV export")?;

    Ok(path)
}
