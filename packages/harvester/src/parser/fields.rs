//! `key : value` tokenizer for the inside of one `<custom_item>` block.
//!
//! Values are usually double-quoted and free-text fields (`info`,
//! `solution`) routinely span many lines:
//!
//! ```text
//! description : "1.1.1 (L1) Ensure 'Enforce password history' is set to '24 or more password(s)'"
//! info        : "This policy setting determines the number of renewed,
//! unique passwords that have to be associated with a user account.
//!
//! The recommended state for this setting is: 24 or more password(s)."
//! ```
//!
//! The tokenizer works line by line with an explicit index so that a value
//! opening a quote can consume the following lines until the quote closes.

use crate::types::{FieldMap, TokenizedBlock};

const QUOTE: char = '"';

/// Tokenize the inner text of a block into its fields.
///
/// Lines without a `:` are skipped. When the same key occurs more than once
/// the last value wins. A quote that is never closed does not fail the
/// block: the value keeps whatever was accumulated and the key is listed in
/// [`TokenizedBlock::unterminated`].
///
/// # Examples
/// ```
/// use audit_harvester::parser::tokenize_block;
///
/// let block = tokenize_block("info : \"line one\nline two\"\ntype : AUDIT_POLICY");
/// assert_eq!(block.field("info"), "line one\nline two");
/// assert_eq!(block.field("type"), "AUDIT_POLICY");
/// ```
pub fn tokenize_block(text: &str) -> TokenizedBlock {
    let lines: Vec<&str> = text.lines().collect();
    let mut fields = FieldMap::new();
    let mut unterminated = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        idx += 1;

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim_start();

        let value = if opens_multiline_quote(value) {
            let first = &value[QUOTE.len_utf8()..];
            let (value, closed) = read_multiline_value(first, &lines, &mut idx);
            if !closed {
                tracing::debug!(key, "Unterminated quoted value");
                unterminated.push(key.to_string());
            }
            value
        } else {
            strip_wrapping_quotes(value.trim()).to_string()
        };

        fields.insert(key.to_string(), value);
    }

    TokenizedBlock {
        fields,
        unterminated,
    }
}

/// A value opens a multiline quote when it starts with `"` but the same line
/// doesn't end with one.
fn opens_multiline_quote(value: &str) -> bool {
    value.starts_with(QUOTE) && !value.trim_end().ends_with(QUOTE)
}

/// Accumulate continuation lines starting at `*idx` until one ends with a
/// quote. Returns the trimmed value and whether the closing quote was found.
fn read_multiline_value(first: &str, lines: &[&str], idx: &mut usize) -> (String, bool) {
    let mut value = first.to_string();
    let mut closed = false;

    while *idx < lines.len() {
        let next = lines[*idx];
        *idx += 1;
        value.push('\n');
        value.push_str(next);
        if next.trim_end().ends_with(QUOTE) {
            closed = true;
            break;
        }
    }

    if closed {
        let without_quote = value
            .trim_end()
            .strip_suffix(QUOTE)
            .unwrap_or(value.as_str());
        (without_quote.trim().to_string(), true)
    } else {
        (value.trim().to_string(), false)
    }
}

/// Strip one leading and one trailing `"` if both are present.
///
/// A lone `"` counts as both and yields the empty string.
pub(crate) fn strip_wrapping_quotes(value: &str) -> &str {
    if value == "\"" {
        return "";
    }
    value
        .strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
        .unwrap_or(value)
}
