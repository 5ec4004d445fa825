use anyhow::Context;
use common::inserter::HighlightLog;
use common::overlay::OverlayContext;
use common::text_highlight::{HIGHLIGHT_CONTAINER_CLASS, HIGHLIGHT_ITEM_CLASS, TAG_HIGHLIGHT_CLASS};
use dioxus::logger::tracing;
use dioxus::prelude::*;
use web_sys::{Element as DomElement, Node};

use crate::browser::{self, BrowserDom};
use crate::components::error_boundary::GlobalErrorBoundary;
use crate::components::highlight_controls::HighlightControls;
use crate::components::passage::{PASSAGE_ID, Passage};

fn highlight_css() -> String {
    format!(
        "
        .{HIGHLIGHT_CONTAINER_CLASS} {{ position: absolute; top: 0; left: 0; pointer-events: none; }}
        .{HIGHLIGHT_ITEM_CLASS} {{ position: absolute; background-color: #eb3f004d; }}
        .{TAG_HIGHLIGHT_CLASS} {{ background-color: #ffe06680; }}
        "
    )
}

/// Undoes the tag pass recorded in `tag_log`, then runs both pipelines over the
/// passage. `tag_log` ends up holding every marker inserted, even when a
/// pipeline fails. Returns the number of overlay rectangles drawn.
fn highlight_passage(
    cover_term: &str,
    tag_term: &str,
    tag_log: &mut HighlightLog<Node>,
    overlay: &mut OverlayContext<DomElement>,
) -> anyhow::Result<usize> {
    browser::undo_tag_highlight(std::mem::take(tag_log)).context("undoing the previous tag highlight")?;
    let root = BrowserDom::from_window()?
        .document()
        .get_element_by_id(PASSAGE_ID)
        .context("passage is not mounted")?;
    browser::tag_highlight_in(&root, tag_term, tag_log).context("tag highlight")?;
    if cover_term.is_empty() {
        browser::clear_cover_highlight(overlay)?;
        return Ok(0);
    }
    let rects = browser::cover_highlight_in(&root, cover_term, overlay).context("overlay highlight")?;
    Ok(rects.len())
}

#[component]
pub fn App() -> Element {
    let cover_term = use_signal(|| "生命".to_string());
    let tag_term = use_signal(|| "人生".to_string());
    let mut status = use_signal(String::new);
    let mut overlay = use_signal(OverlayContext::<DomElement>::new);
    let mut tag_log = use_signal(HighlightLog::<Node>::new);

    use_effect(move || {
        let cover = cover_term.read().clone();
        let tag = tag_term.read().clone();
        let mut log = tag_log.write();
        match highlight_passage(&cover, &tag, &mut log, &mut overlay.write()) {
            Ok(rects) => {
                tracing::info!("{} tag matches, {} overlay rects", log.match_count(), rects);
                status.set(format!("{} tagged, {} rects", log.match_count(), rects));
            }
            Err(e) => {
                tracing::error!("highlight failed: {:#}", e);
                status.set(format!("{:#}", e));
            }
        }
    });

    rsx! {
        style { "{highlight_css()}" }
        GlobalErrorBoundary {
            boundary_name: "App".to_string(),
            HighlightControls { cover_term, tag_term, status }
            Passage {}
        }
    }
}
