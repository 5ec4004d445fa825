//! Runs the highlight pipelines against the live page.

pub mod dom;
pub mod overlay;

use common::error::Result;
use common::geometry::OverlayRect;
use common::inserter::HighlightLog;
use common::overlay::OverlayContext;
use web_sys::{Element, Node};

pub use dom::BrowserDom;
pub use overlay::BrowserOverlay;

/// Draws overlay rectangles over every occurrence of `term` in the paragraphs
/// of `root`, replacing the overlay held by `context`.
pub fn cover_highlight_in(root: &Element, term: &str, context: &mut OverlayContext<Element>) -> Result<Vec<OverlayRect>> {
    let dom = BrowserDom::from_window()?;
    let mut surface = BrowserOverlay::new(dom.document().clone());
    let root: &Node = root;
    common::cover_highlight(&dom, &dom, &mut surface, context, root, term)
}

/// Removes the overlay held by `context`, if any.
pub fn clear_cover_highlight(context: &mut OverlayContext<Element>) -> Result<()> {
    let dom = BrowserDom::from_window()?;
    context.dispose(&mut BrowserOverlay::new(dom.document().clone()))
}

/// Wraps every occurrence of `term` in the paragraphs of `root` in marker spans,
/// recording into `log` as it goes so the markers of a failed run can still be
/// undone.
pub fn tag_highlight_in(root: &Element, term: &str, log: &mut HighlightLog<Node>) -> Result<()> {
    let mut dom = BrowserDom::from_window()?;
    let root: &Node = root;
    common::tag_highlight_into(&mut dom, root, term, log)
}

/// Unwraps the markers recorded in `log`.
pub fn undo_tag_highlight(log: HighlightLog<Node>) -> Result<()> {
    let mut dom = BrowserDom::from_window()?;
    log.undo(&mut dom)
}
