//! Error types for the harvester.
//!
//! Only conditions that abort a whole conversion live here. Anomalies inside a
//! single `<custom_item>` block (unterminated quotes, malformed descriptions)
//! are part of the parser's normal return values and end up as warnings.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// The document contained no `<custom_item>` blocks at all.
    #[error("No <custom_item> blocks found in the audit document")]
    NoBlocksFound,

    /// Invalid benchmark name.
    #[error("Invalid benchmark name: '{0}'. Expected letters, digits, '.', '_' or '-' (e.g., CIS_Microsoft_Windows_Server_2022_v3.0.0_L1_Member_Server)")]
    InvalidBenchmark(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the audit file.
    #[error("Failed to download audit file from {url}: {source}")]
    AuditDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts failed.
    #[error("Download failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeded the configured limit.
    #[error("Response too large: {size} bytes (limit {limit} bytes)")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// Output path is unusable.
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// XLSX workbook error.
    #[error("XLSX generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
