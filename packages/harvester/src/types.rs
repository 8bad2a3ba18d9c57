//! Core data types for the harvester.
//!
//! A `.audit` file is a sequence of `<custom_item>` blocks; every block is
//! turned into one [`Record`] with six columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Field name to raw (unquoted, possibly multiline) value for one block.
pub type FieldMap = HashMap<String, String>;

/// How kept reference tokens are rendered in the NIST column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceLayout {
    /// `800-53|AC-2, 800-53r5|AC-2`
    #[default]
    Joined,

    /// One token per line.
    PerLine,
}

impl ReferenceLayout {
    /// Separator placed between tokens.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Joined => ", ",
            Self::PerLine => "\n",
        }
    }
}

/// Output of the field tokenizer for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedBlock {
    pub fields: FieldMap,

    /// Keys whose opening quote was never closed before the block ended.
    /// Their values hold everything accumulated up to the end of the block.
    pub unterminated: Vec<String>,
}

impl TokenizedBlock {
    /// Value of a field, or the empty string when absent.
    #[must_use]
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Section, level and name split out of a `description` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionParts {
    pub section: String,
    pub level: String,
    pub name: String,
}

/// Result of decomposing a `description` field.
///
/// Both variants carry usable parts; `Unmatched` holds the fallback
/// (empty section and level, the cleaned-up text as name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionParse {
    Parsed(DescriptionParts),
    Unmatched(DescriptionParts),
}

impl DescriptionParse {
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    #[must_use]
    pub fn into_parts(self) -> DescriptionParts {
        match self {
            Self::Parsed(parts) | Self::Unmatched(parts) => parts,
        }
    }
}

/// One row of output, produced for every `<custom_item>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Section")]
    pub section: String,

    #[serde(rename = "Level")]
    pub level: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Remediation Procedure")]
    pub remediation_procedure: String,

    #[serde(rename = "NIST")]
    pub nist: String,
}

/// All records of one audit document plus non-fatal parse warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub records: Vec<Record>,
    pub warnings: Vec<String>,
}
