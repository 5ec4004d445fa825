//! `coverHighlight`, `tagHighlight` and `clearCoverHighlight` for plain JavaScript callers.

use std::cell::RefCell;

use common::error::HighlightError;
use common::inserter::HighlightLog;
use common::overlay::OverlayContext;
use dioxus::logger::tracing;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Node};

use crate::browser;

thread_local! {
    static OVERLAY: RefCell<OverlayContext<Element>> = RefCell::new(OverlayContext::new());
}

fn to_js(err: HighlightError) -> JsValue {
    tracing::error!("highlight failed: {}", err);
    JsValue::from_str(&err.to_string())
}

/// Covers every occurrence of `text` in the paragraphs of `root` with overlay
/// rectangles. The overlay from the previous call is removed first.
#[wasm_bindgen(js_name = coverHighlight)]
pub fn cover_highlight(root: &HtmlElement, text: &str) -> Result<u32, JsValue> {
    OVERLAY
        .with(|context| browser::cover_highlight_in(root, text, &mut context.borrow_mut()))
        .map(|rects| rects.len() as u32)
        .map_err(to_js)
}

#[wasm_bindgen(js_name = clearCoverHighlight)]
pub fn clear_cover_highlight() -> Result<(), JsValue> {
    OVERLAY
        .with(|context| browser::clear_cover_highlight(&mut context.borrow_mut()))
        .map_err(to_js)
}

/// Markers inserted by one `tagHighlight` call.
#[wasm_bindgen]
pub struct TagHighlight {
    log: Option<HighlightLog<Node>>,
}

#[wasm_bindgen]
impl TagHighlight {
    #[wasm_bindgen(getter, js_name = matchCount)]
    pub fn match_count(&self) -> u32 {
        self.log.as_ref().map_or(0, |log| log.match_count() as u32)
    }

    /// Unwraps the markers. Calling it again does nothing.
    pub fn undo(&mut self) -> Result<(), JsValue> {
        match self.log.take() {
            Some(log) => browser::undo_tag_highlight(log).map_err(to_js),
            None => Ok(()),
        }
    }
}

/// Wraps every occurrence of `text` in the paragraphs of `root` in
/// `<span class="tag-highlight">` markers. A run that fails removes the markers
/// it already inserted before throwing.
#[wasm_bindgen(js_name = tagHighlight)]
pub fn tag_highlight(root: &HtmlElement, text: &str) -> Result<TagHighlight, JsValue> {
    let mut log = HighlightLog::new();
    match browser::tag_highlight_in(root, text, &mut log) {
        Ok(()) => Ok(TagHighlight { log: Some(log) }),
        Err(err) => {
            if let Err(undo_err) = browser::undo_tag_highlight(log) {
                tracing::error!("could not remove partial tag highlight: {}", undo_err);
            }
            Err(to_js(err))
        }
    }
}
