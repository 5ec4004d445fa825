//! Highlighting API and module exports.

pub mod documents;

pub use documents::count_html_hits::{count_html_hits, count_html_page_hits};
pub use documents::highlight_html::{
    HighlightedHtml, highlight_html_overlay, highlight_html_overlay_json, highlight_html_spans, highlight_html_tags,
    render_html_overlay,
};
