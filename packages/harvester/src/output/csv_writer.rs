//! CSV writer for parsed records.

use std::path::Path;

use csv::WriterBuilder;

use super::write_atomic;
use crate::error::{HarvesterError, Result};
use crate::types::Record;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 6] = [
    "Section",
    "Level",
    "Name",
    "Description",
    "Remediation Procedure",
    "NIST",
];

/// Generate CSV text for `records`.
///
/// The header row is always written, also for an empty slice. Fields with
/// commas, quotes or newlines are quoted per RFC 4180.
pub fn generate_csv(records: &[Record]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HarvesterError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Save records as a CSV file.
pub fn save_csv(records: &[Record], path: &Path) -> Result<()> {
    let content = generate_csv(records)?;
    write_atomic(path, content.as_bytes())?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Wrote CSV");
    Ok(())
}
