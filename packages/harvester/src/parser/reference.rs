//! Selection of one control family from a `reference` field.

use crate::types::ReferenceLayout;

/// Keep the comma-separated tokens of `raw` that start with `prefix`.
///
/// Tokens are trimmed and empty ones dropped. Order and duplicates are
/// preserved. No matching token yields an empty string.
///
/// # Examples
/// ```
/// use audit_harvester::parser::filter_references;
/// use audit_harvester::types::ReferenceLayout;
///
/// let raw = "800-171|3.5.2,800-53|IA-5(1),CSCv7|16.2";
/// assert_eq!(filter_references(raw, "800-53", ReferenceLayout::Joined), "800-53|IA-5(1)");
/// ```
pub fn filter_references(raw: &str, prefix: &str, layout: ReferenceLayout) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.starts_with(prefix))
        .collect::<Vec<_>>()
        .join(layout.separator())
}
