//! Main harvester service that ties all components together.

use std::path::Path;

use crate::config::ParseOptions;
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, create_client, download_bytes};
use crate::parser::{decompose_description, filter_references, tokenize_block, AuditDocument};
use crate::types::{AuditReport, Record, TokenizedBlock};

/// Download an audit file and return its raw text.
///
/// # Arguments
/// * `url` - Download URL (see [`crate::config::audit_url`])
/// * `max_size` - Largest accepted response body in bytes
pub fn download_audit_text(url: &str, max_size: u64) -> Result<String> {
    let client = create_client()?;
    let bytes = download_bytes(&client, url, max_size).map_err(|e| {
        if let HarvesterError::Http(source) = e {
            HarvesterError::AuditDownload {
                url: url.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, url))
}

/// Download and parse an audit file.
///
/// # Returns
/// The raw audit text (for callers that keep a local copy) and the parsed report
pub fn download_audit(
    url: &str,
    max_size: u64,
    options: &ParseOptions,
) -> Result<(String, AuditReport)> {
    let text = download_audit_text(url, max_size)?;
    let report = parse_audit(&text, options)?;
    Ok((text, report))
}

/// Read and parse an audit file from disk.
pub fn read_audit(path: &Path, options: &ParseOptions) -> Result<AuditReport> {
    let bytes = std::fs::read(path)?;
    let text = bytes_to_string(&bytes, &path.display().to_string());
    parse_audit(&text, options)
}

/// Parse an in-memory audit document into one record per `<custom_item>`.
///
/// Returns `(records, warnings)` wrapped in an [`AuditReport`], where warnings
/// are non-fatal anomalies. Fails only when the document has no blocks.
pub fn parse_audit(text: &str, options: &ParseOptions) -> Result<AuditReport> {
    let document = AuditDocument::new(text);
    let mut report = AuditReport::default();

    for (index, block_text) in document.blocks().enumerate() {
        let block_number = index + 1;
        tracing::debug!(block = block_number, "Parsing custom_item");

        let block = tokenize_block(block_text);
        let (record, warnings) = assemble_record(&block, options);

        for warning in warnings {
            tracing::warn!(block = block_number, "{warning}");
            report.warnings.push(format!("Block {block_number}: {warning}"));
        }
        report.records.push(record);
    }

    if report.records.is_empty() {
        return Err(HarvesterError::NoBlocksFound);
    }

    tracing::info!(
        records = report.records.len(),
        warnings = report.warnings.len(),
        "Parsed audit document"
    );
    Ok(report)
}

/// Build the record for one tokenized block.
///
/// Returns the record plus warnings for anything that had to be degraded.
/// Absent fields become empty strings without a warning.
pub fn assemble_record(block: &TokenizedBlock, options: &ParseOptions) -> (Record, Vec<String>) {
    let mut warnings: Vec<String> = block
        .unterminated
        .iter()
        .map(|key| format!("unterminated quote in field '{key}'"))
        .collect();

    let description = block.field("description");
    let parsed = decompose_description(description, options.pad_width);
    if !description.is_empty() && !parsed.is_parsed() {
        warnings.push(format!(
            "description does not match '<section> (L<level>) <name>': {description:?}"
        ));
    }
    let parts = parsed.into_parts();

    let record = Record {
        section: parts.section,
        level: parts.level,
        name: parts.name,
        description: block.field("info").to_string(),
        remediation_procedure: block.field("solution").to_string(),
        nist: filter_references(
            block.field("reference"),
            &options.reference_prefix,
            options.layout,
        ),
    };

    (record, warnings)
}
