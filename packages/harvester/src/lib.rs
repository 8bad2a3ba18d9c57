//! Audit Harvester - Convert Tenable compliance `.audit` files into tables.
//!
//! This crate extracts every `<custom_item>` block from an audit document
//! and turns it into a [`Record`] with the columns Section, Level, Name,
//! Description, Remediation Procedure and NIST.
//!
//! # Example
//!
//! ```
//! use audit_harvester::{parse_audit, ParseOptions};
//!
//! let audit = r#"<custom_item>
//!   description : "1.1.7 (L1) Ensure 'Store passwords using reversible encryption' is set to 'Disabled'"
//!   reference   : "800-171|3.5.2,800-53|IA-5(1),CSCv7|16.4"
//! </custom_item>"#;
//!
//! let report = parse_audit(audit, &ParseOptions::default()).unwrap();
//! assert_eq!(report.records[0].section, "01.1.7");
//! assert_eq!(report.records[0].nist, "800-53|IA-5(1)");
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants, validation and parse options
//! - [`types`]: Core data types (Record, TokenizedBlock, etc.)
//! - [`error`]: Error types and Result alias
//! - [`parser`]: Block extraction, field tokenizing, description and reference parsing
//! - [`http`]: HTTP client for downloading audit files
//! - [`output`]: CSV, YAML and XLSX output
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod output;
pub mod parser;
pub mod types;

// Re-export main functions
pub use harvester::{download_audit, parse_audit, read_audit};

// Re-export commonly used items
pub use config::{validate_benchmark, ParseOptions};
pub use error::{HarvesterError, Result};
pub use types::{AuditReport, Record, ReferenceLayout};
