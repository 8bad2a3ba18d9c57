//! Persistence of parsed records (CSV, YAML and XLSX).

mod csv_writer;
mod xlsx_writer;
mod yaml_writer;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{HarvesterError, Result};
use crate::types::Record;

pub use csv_writer::{generate_csv, save_csv, CSV_HEADERS};
pub use xlsx_writer::{generate_xlsx, save_xlsx, SHEET_NAME};
pub use yaml_writer::{generate_yaml, save_yaml};

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Yaml,
    Xlsx,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Yaml => "yaml",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Save records to `path` in the given format.
pub fn save_records(records: &[Record], format: OutputFormat, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Csv => save_csv(records, path),
        OutputFormat::Yaml => save_yaml(records, path),
        OutputFormat::Xlsx => save_xlsx(records, path),
    }
}

/// Write `content` to `path` atomically.
///
/// Writes to a hidden temp file next to the destination, syncs it to disk,
/// then renames it over `path`, so a crash never leaves a half-written file.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| HarvesterError::InvalidOutputPath(path.display().to_string()))?;
    let parent = path.parent().unwrap_or(Path::new(""));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let temp_file = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    let result = write_and_rename(&temp_file, path, content);
    if result.is_err() {
        // Best effort; the original error is what gets reported
        let _ = fs::remove_file(&temp_file);
    }
    result
}

fn write_and_rename(temp_file: &Path, path: &Path, content: &[u8]) -> Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(content)?;
        file.sync_all()?; // Ensure data is flushed to disk
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(temp_file, path)?;
    Ok(())
}
