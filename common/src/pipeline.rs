//! Entry points: scan each paragraph of a container and highlight every match.

use tracing::{debug, error};

use crate::error::Result;
use crate::geometry::OverlayRect;
use crate::inserter::{HighlightLog, LeafSnapshot, TagInserter};
use crate::overlay::{OverlayContext, build_overlay};
use crate::resolver::resolve_offset;
use crate::scanner::find_matches;
use crate::text_highlight::TAG_HIGHLIGHT_CLASS;
use crate::tree::{LayoutQuery, OverlaySurface, TextTree, TextTreeMut};
use crate::utf16::utf16_len;

/// Computes the overlay rectangles for every occurrence of `term` in the
/// paragraphs of `container`, without touching any tree.
pub fn plan_cover_highlight<T, L>(tree: &T, layout: &L, container: &T::Node, term: &str) -> Result<Vec<OverlayRect>>
where
    T: TextTree + ?Sized,
    L: LayoutQuery<T> + ?Sized,
{
    let mut rects = Vec::new();
    if term.is_empty() {
        return Ok(rects);
    }
    let term_len = utf16_len(term);
    for paragraph in tree.paragraphs(container) {
        let content = tree.text_content(&paragraph);
        let matches = find_matches(&content, term);
        if matches.is_empty() {
            continue;
        }
        debug!(matches = matches.len(), "paragraph matched");
        for start in matches {
            let start_point = resolve_offset(tree, &paragraph, start)?;
            let end_point = resolve_offset(tree, &paragraph, start + term_len)?;
            rects.extend(build_overlay(tree, layout, &paragraph, &start_point, &end_point)?);
        }
    }
    Ok(rects)
}

/// Highlights every occurrence of `term` with overlay rectangles. The container
/// previously drawn through `context` is replaced. An empty term changes nothing.
pub fn cover_highlight<T, L, S>(
    tree: &T,
    layout: &L,
    surface: &mut S,
    context: &mut OverlayContext<S::Handle>,
    container: &T::Node,
    term: &str,
) -> Result<Vec<OverlayRect>>
where
    T: TextTree + ?Sized,
    L: LayoutQuery<T> + ?Sized,
    S: OverlaySurface + ?Sized,
{
    if term.is_empty() {
        return Ok(Vec::new());
    }
    let rects = plan_logged(tree, layout, container, term)?;
    context.draw(surface, &rects)?;
    Ok(rects)
}

/// [`cover_highlight`] for a host that is its own overlay surface, such as the
/// in-memory document: every rectangle is planned before the tree is touched,
/// then the overlay is drawn into it.
pub fn cover_highlight_in_tree<T, L>(
    tree: &mut T,
    layout: &L,
    context: &mut OverlayContext<T::Handle>,
    container: &T::Node,
    term: &str,
) -> Result<Vec<OverlayRect>>
where
    T: TextTree + OverlaySurface + ?Sized,
    L: LayoutQuery<T> + ?Sized,
{
    if term.is_empty() {
        return Ok(Vec::new());
    }
    let rects = plan_logged(&*tree, layout, container, term)?;
    context.draw(tree, &rects)?;
    Ok(rects)
}

fn plan_logged<T, L>(tree: &T, layout: &L, container: &T::Node, term: &str) -> Result<Vec<OverlayRect>>
where
    T: TextTree + ?Sized,
    L: LayoutQuery<T> + ?Sized,
{
    plan_cover_highlight(tree, layout, container, term).inspect_err(|e| {
        error!("overlay highlight aborted: {}", e);
    })
}

/// Wraps every occurrence of `term` in the paragraphs of `container` in marker
/// elements. Returns the log needed to undo it.
pub fn tag_highlight<T: TextTreeMut + ?Sized>(tree: &mut T, container: &T::Node, term: &str) -> Result<HighlightLog<T::Node>> {
    let mut log = HighlightLog::new();
    tag_highlight_into(tree, container, term, &mut log)?;
    Ok(log)
}

/// Like [`tag_highlight`], recording into `log` as it goes so the mutations
/// applied before a failure can still be undone.
pub fn tag_highlight_into<T: TextTreeMut + ?Sized>(
    tree: &mut T,
    container: &T::Node,
    term: &str,
    log: &mut HighlightLog<T::Node>,
) -> Result<()> {
    if term.is_empty() {
        return Ok(());
    }
    let term_len = utf16_len(term);
    for paragraph in tree.paragraphs(container) {
        // Offsets come from the text as it was before this paragraph was touched.
        let content = tree.text_content(&paragraph);
        let matches = find_matches(&content, term);
        if matches.is_empty() {
            continue;
        }
        debug!(matches = matches.len(), "paragraph matched");
        let mut inserter = TagInserter::new(LeafSnapshot::capture(tree, &paragraph), TAG_HIGHLIGHT_CLASS);
        for start in matches {
            inserter.wrap(tree, start, term_len, log).inspect_err(|e| {
                error!("tag highlight aborted at offset {}: {}", start, e);
            })?;
        }
    }
    Ok(())
}
