//! `<custom_item>` block extraction.

use regex::Regex;
use std::sync::LazyLock;

/// Non-greedy match so adjacent items are never merged; `(?s)` lets `.`
/// cross newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CUSTOM_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<custom_item>(.*?)</custom_item>").expect("valid regex")
});

/// A borrowed audit document.
///
/// [`AuditDocument::blocks`] returns a fresh iterator on every call, so the
/// block sequence can be walked any number of times.
#[derive(Debug, Clone, Copy)]
pub struct AuditDocument<'a> {
    text: &'a str,
}

impl<'a> AuditDocument<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Inner text of every `<custom_item>` block, in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &'a str> + 'a {
        extract_blocks(self.text)
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }
}

/// Lazily yield the inner text of each `<custom_item>` block in `text`.
///
/// Text outside the markers is ignored. An unclosed trailing
/// `<custom_item>` yields nothing.
///
/// # Examples
/// ```
/// use audit_harvester::parser::extract_blocks;
///
/// let doc = "<custom_item>a</custom_item> noise <custom_item>b</custom_item>";
/// let blocks: Vec<&str> = extract_blocks(doc).collect();
/// assert_eq!(blocks, vec!["a", "b"]);
/// ```
pub fn extract_blocks(text: &str) -> impl Iterator<Item = &str> + '_ {
    CUSTOM_ITEM_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}
