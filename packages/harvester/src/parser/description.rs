//! Decomposition of a `description` field into section, level and name.
//!
//! CIS-derived audit files describe every check as
//! `<dotted section> (L<level>) <title>`, for example
//! `1.1.7 (L1) Ensure 'Store passwords using reversible encryption' is set to 'Disabled'`.

use regex::Regex;
use std::sync::LazyLock;

use super::fields::strip_wrapping_quotes;
use crate::types::{DescriptionParse, DescriptionParts};

/// Captures: (1) dotted numeric section, (2) level digits, (3) name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([0-9]+(?:\.[0-9]+)*)\s*\(L([0-9]+)\)\s*(.+)$").expect("valid regex")
});

/// Split a `description` value into section, level and name.
///
/// The first section segment is zero-padded to `pad_width` digits. Text that
/// doesn't follow the pattern comes back as [`DescriptionParse::Unmatched`]
/// with empty section and level and the trimmed, unquoted text as name.
///
/// # Examples
/// ```
/// use audit_harvester::parser::decompose_description;
///
/// let parts = decompose_description("1.1.7 (L1) Ensure 'X' is set", 2).into_parts();
/// assert_eq!(parts.section, "01.1.7");
/// assert_eq!(parts.level, "1");
/// assert_eq!(parts.name, "Ensure 'X' is set");
/// ```
pub fn decompose_description(raw: &str, pad_width: usize) -> DescriptionParse {
    let trimmed = raw.trim();

    let Some(caps) = DESCRIPTION_PATTERN.captures(trimmed) else {
        return DescriptionParse::Unmatched(DescriptionParts {
            section: String::new(),
            level: String::new(),
            name: clean_name(trimmed),
        });
    };

    // All groups are mandatory when the regex matches
    let (Some(section), Some(level), Some(name)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return DescriptionParse::Unmatched(DescriptionParts {
            name: clean_name(trimmed),
            ..DescriptionParts::default()
        });
    };

    DescriptionParse::Parsed(DescriptionParts {
        section: pad_leading_segment(section.as_str(), pad_width),
        level: level.as_str().to_string(),
        name: clean_name(name.as_str()),
    })
}

/// Zero-pad the first dot-delimited segment of `section` to `width` digits.
///
/// Later segments pass through unchanged. Segments that aren't all digits,
/// or already have `width` or more characters, are left alone.
///
/// # Examples
/// ```
/// use audit_harvester::parser::pad_leading_segment;
///
/// assert_eq!(pad_leading_segment("1.1.7", 2), "01.1.7");
/// assert_eq!(pad_leading_segment("10.2.4", 2), "10.2.4");
/// assert_eq!(pad_leading_segment("9", 2), "09");
/// ```
pub fn pad_leading_segment(section: &str, width: usize) -> String {
    let (first, rest) = match section.split_once('.') {
        Some((first, rest)) => (first, Some(rest)),
        None => (section, None),
    };

    let first = if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
        format!("{first:0>width$}")
    } else {
        first.to_string()
    };

    match rest {
        Some(rest) => format!("{first}.{rest}"),
        None => first,
    }
}

fn clean_name(text: &str) -> String {
    strip_wrapping_quotes(text.trim()).trim().to_string()
}
