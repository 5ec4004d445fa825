//! Server-side highlighting of HTML documents.
//!
//! Fragments are parsed into an in-memory tree, highlighted with the pipelines
//! from `common`, and serialized back. Overlay geometry comes from a fixed-pitch
//! [`layout::GridLayout`].

pub mod api;
pub mod dom_utils;
pub mod layout;
