//! Hit counts for HTML pages, computed the way the highlighters find matches.

use std::collections::BTreeMap;

use common::scanner::count_matches;
use common::tree::TextTree;

use crate::dom_utils::parse_html::parse_html;

/// Non-overlapping occurrences of `query` summed over the paragraphs of `html`.
/// A match never spans two paragraphs.
pub fn count_html_hits(html: &str, query: &str) -> anyhow::Result<u32> {
    let doc = parse_html(html);
    let body = doc.body();
    let count: usize = doc
        .paragraphs(&body)
        .iter()
        .map(|paragraph| count_matches(&doc.text_content(paragraph), query))
        .sum();
    Ok(u32::try_from(count)?)
}

/// Hit counts per page index. A page that fails to count reports 0.
pub fn count_html_page_hits(pages: &[String], query: &str) -> BTreeMap<u32, u32> {
    pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| {
            let page_index = page_index as u32;
            let page_hits = match count_html_hits(page, query) {
                Ok(hits) => hits,
                Err(e) => {
                    tracing::error!("Error counting page hits: {}", e);
                    0_u32
                }
            };
            (page_index, page_hits)
        })
        .collect::<BTreeMap<u32, u32>>()
}
