//! Non-destructive highlighting: rectangles drawn in a container above the page.

use tracing::debug;

use crate::error::Result;
use crate::geometry::{OverlayRect, overlay_rects};
use crate::text_highlight::{HIGHLIGHT_CONTAINER_CLASS, HIGHLIGHT_ITEM_CLASS};
use crate::tree::{BoundaryPoint, LayoutQuery, OverlaySurface, TextTree};

/// Rectangles covering the text between `start` and `end` inside `paragraph`.
pub fn build_overlay<T, L>(
    tree: &T,
    layout: &L,
    paragraph: &T::Node,
    start: &BoundaryPoint<T::Node>,
    end: &BoundaryPoint<T::Node>,
) -> Result<Vec<OverlayRect>>
where
    T: TextTree + ?Sized,
    L: LayoutQuery<T> + ?Sized,
{
    let paragraph_rect = layout.element_rect(tree, paragraph)?;
    let start_rect = layout.caret_rect(tree, start)?;
    let end_rect = layout.caret_rect(tree, end)?;
    Ok(overlay_rects(&paragraph_rect, &start_rect, &end_rect, layout.scroll_offset()))
}

/// Owns the overlay container of one page. Drawing replaces the previous
/// container, so at most one is attached at any time.
#[derive(Debug)]
pub struct OverlayContext<H> {
    current: Option<H>,
}

impl<H> Default for OverlayContext<H> {
    fn default() -> Self {
        OverlayContext { current: None }
    }
}

impl<H: Clone + std::fmt::Debug> OverlayContext<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The container currently attached, if any.
    pub fn handle(&self) -> Option<&H> {
        self.current.as_ref()
    }

    /// Disposes the current container and creates a fresh, detached one.
    pub fn replace<S: OverlaySurface<Handle = H> + ?Sized>(&mut self, surface: &mut S) -> Result<H> {
        self.dispose(surface)?;
        let container = surface.create_container(HIGHLIGHT_CONTAINER_CLASS)?;
        self.current = Some(container.clone());
        Ok(container)
    }

    /// Replaces the container with one holding `rects` and attaches it to the body.
    pub fn draw<S: OverlaySurface<Handle = H> + ?Sized>(&mut self, surface: &mut S, rects: &[OverlayRect]) -> Result<H> {
        let container = self.replace(surface)?;
        for rect in rects {
            surface.append_rect(&container, rect, HIGHLIGHT_ITEM_CLASS)?;
        }
        surface.attach(&container)?;
        debug!(rects = rects.len(), "overlay drawn");
        Ok(container)
    }

    pub fn dispose<S: OverlaySurface<Handle = H> + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        if let Some(previous) = self.current.take() {
            surface.dispose(&previous)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn rect(left: f64) -> OverlayRect {
        OverlayRect { width: 10.0, height: 20.0, left, top: 0.0 }
    }

    #[test]
    fn drawing_twice_leaves_one_container() {
        let mut doc = Document::new();
        let mut context = OverlayContext::new();
        context.draw(&mut doc, &[rect(0.0), rect(20.0)]).unwrap();
        let second = context.draw(&mut doc, &[rect(40.0)]).unwrap();

        let containers = doc.elements_by_class(doc.root(), HIGHLIGHT_CONTAINER_CLASS);
        assert_eq!(containers, vec![second]);
        assert_eq!(doc.elements_by_class(second, HIGHLIGHT_ITEM_CLASS).len(), 1);
        assert_eq!(context.handle(), Some(&second));
    }

    #[test]
    fn dispose_removes_the_container() {
        let mut doc = Document::new();
        let mut context = OverlayContext::new();
        context.draw(&mut doc, &[]).unwrap();
        context.dispose(&mut doc).unwrap();
        assert!(doc.elements_by_class(doc.root(), HIGHLIGHT_CONTAINER_CLASS).is_empty());
        assert!(context.handle().is_none());
        context.dispose(&mut doc).unwrap();
    }
}
