//! Text highlighting core shared between the in-memory and browser hosts.
//!
//! Two pipelines find every occurrence of a term in the paragraphs of a
//! container: [`pipeline::cover_highlight`] draws rectangles above the text,
//! [`pipeline::tag_highlight`] wraps the matched characters in marker elements.

extern crate serde;


pub mod error;
pub mod utf16;
pub mod tree;
pub mod geometry;
pub mod scanner;
pub mod resolver;
pub mod overlay;
pub mod inserter;
pub mod pipeline;
pub mod dom;
pub mod text_highlight;

pub use error::HighlightError;
pub use pipeline::{cover_highlight, cover_highlight_in_tree, plan_cover_highlight, tag_highlight, tag_highlight_into};
