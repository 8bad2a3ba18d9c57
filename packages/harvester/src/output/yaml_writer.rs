//! YAML writer for parsed records.

use std::path::Path;

use super::write_atomic;
use crate::error::Result;
use crate::types::Record;

/// Generate a YAML document holding `records` as a sequence of mappings.
pub fn generate_yaml(records: &[Record]) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(records)?;

    // Add document start marker
    let body = yaml_string.strip_prefix("---\n").unwrap_or(&yaml_string);
    Ok(format!("---\n{body}"))
}

/// Save records as a YAML file.
pub fn save_yaml(records: &[Record], path: &Path) -> Result<()> {
    let content = generate_yaml(records)?;
    write_atomic(path, content.as_bytes())?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Wrote YAML");
    Ok(())
}
