//! Tag and overlay highlighting of HTML fragments.
//!
//! The top-level elements of the fragment are the paragraphs.

use common::geometry::OverlayRect;
use common::inserter::HighlightLog;
use common::overlay::OverlayContext;
use common::pipeline::{cover_highlight_in_tree, plan_cover_highlight, tag_highlight};
use common::text_highlight::HighlightTextSpan;
use common::tree::TextTree;
use serde::{Deserialize, Serialize};

use crate::dom_utils::decompose_spans::decompose_paragraph_into_spans;
use crate::dom_utils::parse_html::parse_html;
use crate::layout::GridLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedHtml {
    pub html: String,
    pub match_count: u64,
}

/// Wraps every occurrence of `query` in `tag-highlight` spans.
pub fn highlight_html_tags(html: &str, query: &str) -> anyhow::Result<HighlightedHtml> {
    let mut doc = parse_html(html);
    let body = doc.body();
    let log: HighlightLog<_> = tag_highlight(&mut doc, &body, query)?;
    tracing::debug!(matches = log.match_count(), "tag highlighted fragment");
    Ok(HighlightedHtml { html: doc.inner_html(body), match_count: log.match_count() as u64 })
}

/// Per paragraph, the text split into plain and highlighted spans.
pub fn highlight_html_spans(html: &str, query: &str) -> anyhow::Result<Vec<Vec<HighlightTextSpan>>> {
    let mut doc = parse_html(html);
    let body = doc.body();
    let log = tag_highlight(&mut doc, &body, query)?;
    let spans = doc
        .paragraphs(&body)
        .into_iter()
        .map(|paragraph| decompose_paragraph_into_spans(&doc, paragraph, &log))
        .collect();
    Ok(spans)
}

/// Overlay rectangles for every occurrence of `query`, with the fragment laid
/// out by `grid`.
pub fn highlight_html_overlay(html: &str, query: &str, grid: &GridLayout) -> anyhow::Result<Vec<OverlayRect>> {
    let doc = parse_html(html);
    let body = doc.body();
    let page = grid.page(&doc, body);
    Ok(plan_cover_highlight(&doc, &page, &body, query)?)
}

/// The fragment followed by a `highlight-container` holding its overlay rectangles.
/// An empty query returns the fragment unchanged.
pub fn render_html_overlay(html: &str, query: &str, grid: &GridLayout) -> anyhow::Result<String> {
    let mut doc = parse_html(html);
    let body = doc.body();
    let page = grid.page(&doc, body);
    cover_highlight_in_tree(&mut doc, &page, &mut OverlayContext::new(), &body, query)?;
    Ok(doc.inner_html(body))
}

/// [`highlight_html_overlay`] serialized as JSON, laid out with the grid
/// configured in the environment (see [`GridLayout::from_env`]).
pub fn highlight_html_overlay_json(html: &str, query: &str) -> anyhow::Result<String> {
    let rects = highlight_html_overlay(html, query, &GridLayout::from_env())?;
    Ok(serde_json::to_string(&rects)?)
}
