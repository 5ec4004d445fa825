use backend::api::{
    count_html_hits, highlight_html_overlay, highlight_html_overlay_json, highlight_html_spans, highlight_html_tags,
    render_html_overlay,
};
use backend::dom_utils::parse_html::parse_html;
use backend::layout::GridLayout;
use common::geometry::{OverlayRect, ScrollOffset};
use common::overlay::OverlayContext;
use common::pipeline::{cover_highlight_in_tree, tag_highlight};
use common::text_highlight::{HIGHLIGHT_CONTAINER_CLASS, HIGHLIGHT_ITEM_CLASS, TAG_HIGHLIGHT_CLASS};
use common::tree::TextTree;
use expect_test::expect;

const PASSAGE: &str = concat!(
    "<p>你好，很高兴见到你</p>",
    "<p>你好，很高<span>兴见到</span>你</p>",
    "<p> <span>你好，很高</span>兴见到你 </p>",
);

// ---------------------------------------------------------------------------
// Tag highlighting
// ---------------------------------------------------------------------------

#[test]
fn tags_matches_inside_and_across_elements() {
    let highlighted = highlight_html_tags(PASSAGE, "高兴").unwrap();
    assert_eq!(highlighted.match_count, 3);
    let expected = expect![[
        r#"<p>你好，很<span class="tag-highlight">高兴</span>见到你</p><p>你好，很<span class="tag-highlight">高</span><span><span class="tag-highlight">兴</span>见到</span>你</p><p> <span>你好，很<span class="tag-highlight">高</span></span><span class="tag-highlight">兴</span>见到你 </p>"#
    ]];
    expected.assert_eq(&highlighted.html);
}

#[test]
fn marker_contents_match_the_term_per_paragraph() {
    let mut doc = parse_html(PASSAGE);
    let body = doc.body();
    tag_highlight(&mut doc, &body, "高兴").unwrap();
    let per_paragraph: Vec<Vec<String>> = doc
        .paragraphs(&body)
        .into_iter()
        .map(|p| doc.elements_by_class(p, TAG_HIGHLIGHT_CLASS).into_iter().map(|m| doc.inner_html(m)).collect())
        .collect();
    assert_eq!(per_paragraph, vec![vec!["高兴"], vec!["高", "兴"], vec!["高", "兴"]]);
}

#[test]
fn tag_highlight_then_undo_restores_the_fragment() {
    let mut doc = parse_html(PASSAGE);
    let body = doc.body();
    let before = doc.inner_html(body);
    let log = tag_highlight(&mut doc, &body, "你").unwrap();
    assert_eq!(log.match_count(), 6);
    assert_ne!(doc.inner_html(body), before);
    log.undo(&mut doc).unwrap();
    assert_eq!(doc.inner_html(body), before);
}

#[test]
fn rerunning_nests_markers_inside_markers() {
    let mut doc = parse_html("<p>人生</p>");
    let body = doc.body();
    tag_highlight(&mut doc, &body, "人生").unwrap();
    tag_highlight(&mut doc, &body, "人生").unwrap();
    let expected = expect![[
        r#"<p><span class="tag-highlight"><span class="tag-highlight">人生</span></span></p>"#
    ]];
    expected.assert_eq(&doc.inner_html(body));
}

#[test]
fn implied_paragraph_ends_keep_matches_apart() {
    let highlighted = highlight_html_tags("<p>ab<p>cd", "bc").unwrap();
    assert_eq!(highlighted.match_count, 0);
    assert_eq!(highlighted.html, "<p>ab</p><p>cd</p>");
    // Top-level items are paragraphs of their own once the next one closes them.
    assert_eq!(count_html_hits("<li>ab<li>cd</li><p>bc", "bc").unwrap(), 1);
}

#[test]
fn empty_query_leaves_the_fragment_alone() {
    let highlighted = highlight_html_tags(PASSAGE, "").unwrap();
    assert_eq!(highlighted.match_count, 0);
    let untouched = parse_html(PASSAGE);
    assert_eq!(highlighted.html, untouched.inner_html(untouched.body()));
}

#[test]
fn spans_merge_markers_of_one_match() {
    let spans = highlight_html_spans(PASSAGE, "高兴").unwrap();
    let rendered: Vec<String> = spans
        .iter()
        .map(|paragraph| {
            paragraph
                .iter()
                .map(|span| if span.is_highlighted { format!("[{}#{}]", span.text, span.index) } else { span.text.clone() })
                .collect()
        })
        .collect();
    let expected = expect![[r#"
        [
            "你好，很[高兴#0]见到你",
            "你好，很[高兴#1]见到你",
            " 你好，很[高兴#2]见到你 ",
        ]
    "#]];
    expected.assert_debug_eq(&rendered);
}

// ---------------------------------------------------------------------------
// Overlay highlighting
// ---------------------------------------------------------------------------

fn narrow_grid() -> GridLayout {
    // Four cells per line.
    GridLayout::new(10.0, 20.0, 40.0)
}

#[test]
fn overlay_rect_count_follows_line_wrapping() {
    let grid = narrow_grid();
    // "ab" on one line.
    assert_eq!(highlight_html_overlay("<p>xabx</p>", "ab", &grid).unwrap().len(), 1);
    // "cdef" runs from line 1 into line 2.
    assert_eq!(highlight_html_overlay("<p>abcdefgh</p>", "cdef", &grid).unwrap().len(), 2);
    // "bcdefghijk" covers all of line 2.
    assert_eq!(highlight_html_overlay("<p>abcdefghijkl</p>", "bcdefghijk", &grid).unwrap().len(), 3);
}

#[test]
fn overlay_rects_are_in_document_coordinates() {
    let grid = narrow_grid().with_scroll(ScrollOffset { x: 0.0, y: 50.0 });
    let rects = highlight_html_overlay("<p>abcd</p><p>xy<b>z</b>w</p>", "yzw", &grid).unwrap();
    assert_eq!(rects, vec![OverlayRect { width: 30.0, height: 20.0, left: 10.0, top: 70.0 }]);
}

#[test]
fn overlay_json_uses_the_default_grid() {
    // 8px cells and 23px lines unless HIGHLIGHT_*_PX say otherwise.
    let json = highlight_html_overlay_json("<p>abcd</p><p>xy<b>z</b>w</p>", "yzw").unwrap();
    let expected = expect![[r#"[{"width":24.0,"height":23.0,"left":8.0,"top":23.0}]"#]];
    expected.assert_eq(&json);
}

#[test]
fn overlay_does_not_touch_the_searched_paragraphs() {
    let rendered = render_html_overlay("<p>ab<i>c</i>d</p>", "bc", &narrow_grid()).unwrap();
    let expected = expect![[
        r#"<p>ab<i>c</i>d</p><div class="highlight-container"><div class="highlight-item" style="height: 20px; width: 20px; left: 10px; top: 0px;"></div></div>"#
    ]];
    expected.assert_eq(&rendered);
}

#[test]
fn rendering_an_empty_query_draws_no_container() {
    let rendered = render_html_overlay("<p>ab<i>c</i>d</p>", "", &narrow_grid()).unwrap();
    assert_eq!(rendered, "<p>ab<i>c</i>d</p>");
}

#[test]
fn repeated_overlay_runs_keep_a_single_container() {
    let mut doc = parse_html(PASSAGE);
    let body = doc.body();
    let grid = GridLayout::default();
    let mut context = OverlayContext::new();
    for _ in 0..2 {
        let page = grid.page(&doc, body);
        let rects = cover_highlight_in_tree(&mut doc, &page, &mut context, &body, "高兴").unwrap();
        assert_eq!(rects.len(), 3);
    }
    let containers = doc.elements_by_class(body, HIGHLIGHT_CONTAINER_CLASS);
    assert_eq!(containers.len(), 1);
    assert_eq!(doc.elements_by_class(containers[0], HIGHLIGHT_ITEM_CLASS).len(), 3);
    assert_eq!(doc.paragraphs(&body).last(), Some(&containers[0]));
}

// ---------------------------------------------------------------------------
// Hit counting
// ---------------------------------------------------------------------------

#[test]
fn hit_count_agrees_with_tag_highlighting() {
    let count = count_html_hits(PASSAGE, "你").unwrap();
    assert_eq!(u64::from(count), highlight_html_tags(PASSAGE, "你").unwrap().match_count);
}
