//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};
use crate::types::ReferenceLayout;

/// Base URL of the Tenable audit file API.
pub const TENABLE_AUDIT_API_URL: &str = "https://www.tenable.com/audits/api/v1/files";

/// Benchmark downloaded when none is given on the command line.
pub const DEFAULT_BENCHMARK: &str = "CIS_Microsoft_Windows_Server_2022_v3.0.0_L1_Member_Server";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (50 MB).
///
/// Audit files are a few megabytes at most. Can be overridden via the CLI
/// --max-size flag.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Width the first section segment is zero-padded to ("1.1.7" -> "01.1.7").
pub const SECTION_PAD_WIDTH: usize = 2;

/// Reference family kept in the NIST column.
///
/// Matches both `800-53|AC-2` and revision-tagged `800-53r5|AC-2` tokens.
pub const NIST_REFERENCE_PREFIX: &str = "800-53";

/// Benchmark name pattern: the file name segment used by the Tenable API.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BENCHMARK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// Validate a Tenable benchmark name.
///
/// # Examples
/// ```
/// use audit_harvester::config::validate_benchmark;
///
/// assert!(validate_benchmark("CIS_Microsoft_Windows_Server_2022_v3.0.0_L1_Member_Server").is_ok());
/// assert!(validate_benchmark("../etc/passwd").is_err());
/// ```
pub fn validate_benchmark(benchmark: &str) -> Result<()> {
    if BENCHMARK_PATTERN.is_match(benchmark) && !benchmark.contains("..") {
        Ok(())
    } else {
        Err(HarvesterError::InvalidBenchmark(benchmark.to_string()))
    }
}

/// Build the download URL for a benchmark.
///
/// # Panics
/// Debug builds panic if the benchmark name wasn't validated first.
pub fn audit_url(benchmark: &str) -> String {
    debug_assert!(
        validate_benchmark(benchmark).is_ok(),
        "benchmark should be validated before calling audit_url"
    );
    format!("{TENABLE_AUDIT_API_URL}/{benchmark}/download")
}

/// Lowercase, underscore-separated file stem for a benchmark name.
///
/// # Examples
/// ```
/// use audit_harvester::config::benchmark_slug;
///
/// assert_eq!(
///     benchmark_slug("CIS_Microsoft_Windows_Server_2022_v3.0.0_L1_Member_Server"),
///     "cis_microsoft_windows_server_2022_v3_0_0_l1_member_server"
/// );
/// ```
pub fn benchmark_slug(benchmark: &str) -> String {
    let slug: String = benchmark
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    slug.split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Parser policy: how sections are padded and which references are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub pad_width: usize,
    pub reference_prefix: String,
    pub layout: ReferenceLayout,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            pad_width: SECTION_PAD_WIDTH,
            reference_prefix: NIST_REFERENCE_PREFIX.to_string(),
            layout: ReferenceLayout::Joined,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pad_width(mut self, pad_width: usize) -> Self {
        self.pad_width = pad_width;
        self
    }

    pub fn with_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = prefix.into();
        self
    }

    pub fn with_layout(mut self, layout: ReferenceLayout) -> Self {
        self.layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_benchmark_valid() {
        assert!(validate_benchmark(DEFAULT_BENCHMARK).is_ok());
        assert!(validate_benchmark("CIS_Ubuntu_Linux_22.04_LTS_v2.0.0_L1_Server").is_ok());
        assert!(validate_benchmark("DISA_STIG_Windows_10_v3r2").is_ok());
    }

    #[test]
    fn test_validate_benchmark_invalid() {
        assert!(validate_benchmark("").is_err());
        assert!(validate_benchmark("has space").is_err());
        assert!(validate_benchmark("a/b").is_err());
        assert!(validate_benchmark("..").is_err());
        assert!(validate_benchmark("-leading-dash").is_err());
        assert!(validate_benchmark("x..y").is_err());
    }

    #[test]
    fn test_audit_url() {
        assert_eq!(
            audit_url(DEFAULT_BENCHMARK),
            "https://www.tenable.com/audits/api/v1/files/CIS_Microsoft_Windows_Server_2022_v3.0.0_L1_Member_Server/download"
        );
    }

    #[test]
    fn test_benchmark_slug() {
        assert_eq!(benchmark_slug("DISA_STIG_Windows_10_v3r2"), "disa_stig_windows_10_v3r2");
        assert_eq!(benchmark_slug("a--b..c"), "a_b_c");
    }

    #[test]
    fn test_parse_options_default() {
        let options = ParseOptions::default();
        assert_eq!(options.pad_width, 2);
        assert_eq!(options.reference_prefix, "800-53");
        assert_eq!(options.layout, ReferenceLayout::Joined);
    }

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_pad_width(3)
            .with_reference_prefix("CSCv7")
            .with_layout(ReferenceLayout::PerLine);
        assert_eq!(options.pad_width, 3);
        assert_eq!(options.reference_prefix, "CSCv7");
        assert_eq!(options.layout, ReferenceLayout::PerLine);
    }
}
