//! End-to-end integration tests for the harvester pipeline.
//!
//! Tests the complete pipeline from raw audit text to CSV/YAML/XLSX output
//! using a trimmed-down CIS Microsoft Windows Server 2022 audit file.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use audit_harvester::output::{generate_csv, generate_yaml, save_records, OutputFormat};
use audit_harvester::parser::AuditDocument;
use audit_harvester::{parse_audit, read_audit, AuditReport, HarvesterError, ParseOptions, Record, ReferenceLayout};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("cis_win2022_sample.audit")
}

/// Load fixture file content.
fn load_fixture() -> String {
    let path = fixture_path();
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Run the harvester pipeline on the fixture.
fn run_pipeline(options: &ParseOptions) -> AuditReport {
    parse_audit(&load_fixture(), options).expect("fixture should parse")
}

#[test]
fn test_pipeline_record_count_matches_blocks() {
    let text = load_fixture();
    let report = run_pipeline(&ParseOptions::default());

    assert_eq!(AuditDocument::new(&text).block_count(), 6);
    assert_eq!(report.records.len(), 6, "Expected one record per custom_item");
}

#[test]
fn test_pipeline_preserves_document_order() {
    let report = run_pipeline(&ParseOptions::default());
    let sections: Vec<&str> = report.records.iter().map(|r| r.section.as_str()).collect();

    assert_eq!(
        sections,
        vec!["01.1.1", "01.1.7", "02.3.1.1", "18.10.42.5.1", "", "09.3.4"]
    );
}

#[test]
fn test_pipeline_multiline_fields() {
    let report = run_pipeline(&ParseOptions::default());
    let first = &report.records[0];

    assert_eq!(first.level, "1");
    assert_eq!(
        first.name,
        "Ensure 'Enforce password history' is set to '24 or more password(s)'"
    );
    assert_eq!(
        first.description,
        "This policy setting determines the number of renewed, unique passwords that have to be associated with a user account before you can reuse an old password.\n\nThe recommended state for this setting is: 24 or more password(s)."
    );
    assert!(first
        .remediation_procedure
        .starts_with("To establish the recommended configuration via GP"));
    assert!(first.remediation_procedure.contains("\n\nImpact:\n\n"));
    assert!(first
        .remediation_procedure
        .ends_with("required to change their old password."));
}

#[test]
fn test_pipeline_nist_joined() {
    let report = run_pipeline(&ParseOptions::default());

    assert_eq!(report.records[0].nist, "800-53|IA-5(1), 800-53r5|IA-5(1)");
    assert_eq!(report.records[1].nist, "800-53|IA-5(1), 800-53r5|IA-5(1)");
    assert_eq!(report.records[2].nist, "");
    assert_eq!(report.records[3].nist, "800-53|SI-3, 800-53|SI-3");
}

#[test]
fn test_pipeline_nist_per_line() {
    let options = ParseOptions::new().with_layout(ReferenceLayout::PerLine);
    let report = run_pipeline(&options);

    assert_eq!(report.records[0].nist, "800-53|IA-5(1)\n800-53r5|IA-5(1)");
    assert_eq!(report.records[3].nist, "800-53|SI-3\n800-53|SI-3");
}

#[test]
fn test_pipeline_missing_fields_are_empty() {
    let report = run_pipeline(&ParseOptions::default());
    let nested = &report.records[2];

    assert_eq!(nested.section, "02.3.1.1");
    assert_eq!(
        nested.name,
        "Ensure 'Accounts: Block Microsoft accounts' is set to 'Users can't add or log on with Microsoft accounts'"
    );
    assert_eq!(nested.description, "");
    assert_eq!(nested.remediation_procedure, "");
}

#[test]
fn test_pipeline_degrades_anomalies() {
    let report = run_pipeline(&ParseOptions::default());

    let free_text = &report.records[4];
    assert_eq!(free_text.section, "");
    assert_eq!(free_text.level, "");
    assert_eq!(free_text.name, "Windows Server 2022 is installed");
    assert_eq!(free_text.remediation_procedure, "Nothing to remediate.");

    let unterminated = &report.records[5];
    assert_eq!(unterminated.section, "09.3.4");
    assert!(unterminated.description.ends_with("800-53|SC-7, 800-53|SC-7"));
    assert_eq!(unterminated.nist, "");

    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].starts_with("Block 5:"));
    assert_eq!(report.warnings[1], "Block 6: unterminated quote in field 'info'");
}

#[test]
fn test_pipeline_is_idempotent() {
    let text = load_fixture();
    let options = ParseOptions::default();

    let first = parse_audit(&text, &options).unwrap();
    let second = parse_audit(&text, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        generate_csv(&first.records).unwrap(),
        generate_csv(&second.records).unwrap()
    );
}

#[test]
fn test_pipeline_custom_padding() {
    let options = ParseOptions::new().with_pad_width(3);
    let report = run_pipeline(&options);

    assert_eq!(report.records[0].section, "001.1.1");
    assert_eq!(report.records[3].section, "018.10.42.5.1");
}

#[test]
fn test_no_blocks_found() {
    let result = parse_audit(
        "#TRUSTED abc\n<check_type:\"Unix\">\n</check_type>\n",
        &ParseOptions::default(),
    );
    assert!(matches!(result, Err(HarvesterError::NoBlocksFound)));
}

#[test]
fn test_read_audit_from_disk() {
    let report = read_audit(&fixture_path(), &ParseOptions::default()).unwrap();
    assert_eq!(report.records.len(), 6);
}

#[test]
fn test_read_audit_missing_file() {
    let result = read_audit(Path::new("does/not/exist.audit"), &ParseOptions::default());
    assert!(matches!(result, Err(HarvesterError::Io(_))));
}

#[test]
fn test_csv_output() {
    let report = run_pipeline(&ParseOptions::default());
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("cis_win2022.csv");

    save_records(&report.records, OutputFormat::Csv, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    assert_eq!(
        headers,
        vec!["Section", "Level", "Name", "Description", "Remediation Procedure", "NIST"]
    );

    let rows: Vec<Record> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows, report.records);
}

#[test]
fn test_yaml_output_validates_structure() {
    let report = run_pipeline(&ParseOptions::default());
    let yaml = generate_yaml(&report.records).expect("Failed to generate YAML");

    assert!(yaml.starts_with("---\n"), "YAML should start with document marker");

    let parsed: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&yaml).expect("Generated YAML should be valid");
    let rows = parsed.as_sequence().expect("records should be a sequence");
    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0].get("Section").and_then(|v| v.as_str()),
        Some("01.1.1")
    );
    assert_eq!(rows[0].get("Level").and_then(|v| v.as_str()), Some("1"));
}
