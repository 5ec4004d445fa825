//! Helpers for decomposing a tag-highlighted paragraph into text spans.

use common::dom::{Document, NodeData, NodeId};
use common::inserter::HighlightLog;
use common::text_highlight::HighlightTextSpan;
use common::tree::TextTree;

/// Splits the text of `paragraph` into plain and highlighted runs. Adjacent
/// markers of the same match merge into one span, so a match split across
/// elements still comes out as a single highlighted span.
pub fn decompose_paragraph_into_spans(
    doc: &Document,
    paragraph: NodeId,
    log: &HighlightLog<NodeId>,
) -> Vec<HighlightTextSpan> {
    let mut spans: Vec<HighlightTextSpan> = Vec::new();
    collect_spans(doc, paragraph, None, log, &mut spans);
    spans
}

fn collect_spans(
    doc: &Document,
    node: NodeId,
    current_match: Option<usize>,
    log: &HighlightLog<NodeId>,
    spans: &mut Vec<HighlightTextSpan>,
) {
    for child in doc.children(&node) {
        match doc.data(child) {
            NodeData::Text(text) => push_span(spans, text, current_match),
            NodeData::Element { .. } => {
                let marker_match = log
                    .splices()
                    .iter()
                    .find(|splice| splice.marker == child)
                    .map(|splice| splice.match_index);
                collect_spans(doc, child, marker_match.or(current_match), log, spans);
            }
            _ => {}
        }
    }
}

// Merges with the previous span when it has the same highlight state, to avoid tiny adjacent spans.
fn push_span(spans: &mut Vec<HighlightTextSpan>, text: &str, current_match: Option<usize>) {
    if text.is_empty() {
        return;
    }
    let is_highlighted = current_match.is_some();
    let index = current_match.unwrap_or(0) as u64;
    if let Some(last) = spans.last_mut() {
        if last.is_highlighted == is_highlighted && last.index == index {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(HighlightTextSpan { text: text.to_string(), is_highlighted, index });
}
