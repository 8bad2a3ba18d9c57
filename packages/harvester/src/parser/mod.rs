//! Parsing of `.audit` documents.
//!
//! The pipeline per document is:
//!
//! ```text
//! raw text ─► blocks ─► fields ─┬─► description ─┐
//!                               └─► reference ───┴─► Record
//! ```
//!
//! Nothing in here performs I/O; every function works on borrowed text.

mod blocks;
mod description;
mod fields;
mod reference;

pub use blocks::{extract_blocks, AuditDocument};
pub use description::{decompose_description, pad_leading_segment};
pub use fields::tokenize_block;
pub use reference::filter_references;
