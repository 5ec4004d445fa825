//! Parsing and decomposition helpers for in-memory documents.

pub mod decompose_spans;
pub mod parse_html;
