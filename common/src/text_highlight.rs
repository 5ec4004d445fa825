//! Class names and span models shared by the highlighters and their renderers.

use serde::{Deserialize, Serialize};

/// Class of the element holding every overlay rectangle.
pub const HIGHLIGHT_CONTAINER_CLASS: &str = "highlight-container";
/// Class of one overlay rectangle.
pub const HIGHLIGHT_ITEM_CLASS: &str = "highlight-item";
/// Class of the marker elements inserted around matched text.
pub const TAG_HIGHLIGHT_CLASS: &str = "tag-highlight";

/// A run of paragraph text, either plain or part of the match numbered `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightTextSpan {
    pub text: String,
    pub is_highlighted: bool,
    pub index: u64,
}
