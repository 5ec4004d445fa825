//! Host abstraction: the highlighters walk and rewrite any tree implementing these traits.
//!
//! Offsets and lengths are UTF-16 code units, the unit DOM text APIs use.

use crate::error::Result;
use crate::geometry::{OverlayRect, Rect, ScrollOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, processing instructions and anything else that carries no rendered text.
    Other,
}

/// A position inside the tree: a node and an offset local to that node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPoint<N> {
    pub node: N,
    pub offset: usize,
}

/// Read-only view of a document tree.
pub trait TextTree {
    type Node: Clone + PartialEq + std::fmt::Debug;

    fn node_kind(&self, node: &Self::Node) -> NodeKind;

    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Flattened text of the node: every text descendant, in document order.
    fn text_content(&self, node: &Self::Node) -> String;

    /// Length of [`TextTree::text_content`] in UTF-16 code units.
    fn text_len(&self, node: &Self::Node) -> usize {
        crate::utf16::utf16_len(&self.text_content(node))
    }

    fn children(&self, node: &Self::Node) -> Children<'_, Self> {
        Children { tree: self, next: self.first_child(node) }
    }

    /// Direct element children of `container`: the units searched independently.
    fn paragraphs(&self, container: &Self::Node) -> Vec<Self::Node> {
        self.children(container)
            .filter(|child| self.node_kind(child) == NodeKind::Element)
            .collect()
    }
}

pub struct Children<'t, T: TextTree + ?Sized> {
    tree: &'t T,
    next: Option<T::Node>,
}

impl<'t, T: TextTree + ?Sized> Iterator for Children<'t, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.tree.next_sibling(&current);
        Some(current)
    }
}

/// Mutations the tag pipeline and its undo pass need.
pub trait TextTreeMut: TextTree {
    /// Splits a text node at `offset`. The node keeps `[0, offset)`; the returned
    /// node holds the rest and is inserted directly after it.
    fn split_text(&mut self, node: &Self::Node, offset: usize) -> Result<Self::Node>;

    /// Replaces a text node with a new marker element of class `class` that
    /// adopts the text node as its only child. Returns the marker.
    fn wrap_text(&mut self, node: &Self::Node, class: &str) -> Result<Self::Node>;

    /// Moves the marker's children into its place and removes the marker.
    fn unwrap_marker(&mut self, marker: &Self::Node) -> Result<()>;

    fn text_data(&self, node: &Self::Node) -> Result<String>;

    fn set_text_data(&mut self, node: &Self::Node, data: &str) -> Result<()>;

    /// Detaches the node from its parent.
    fn remove(&mut self, node: &Self::Node) -> Result<()>;
}

/// Geometry queries against a laid-out tree, in viewport coordinates.
pub trait LayoutQuery<T: TextTree + ?Sized> {
    fn element_rect(&self, tree: &T, node: &T::Node) -> Result<Rect>;

    /// Box of a collapsed range at `point`.
    fn caret_rect(&self, tree: &T, point: &BoundaryPoint<T::Node>) -> Result<Rect>;

    fn scroll_offset(&self) -> ScrollOffset;
}

/// Where the overlay pipeline draws its rectangles.
pub trait OverlaySurface {
    type Handle: Clone + std::fmt::Debug;

    /// Creates a detached container element.
    fn create_container(&mut self, class: &str) -> Result<Self::Handle>;

    fn append_rect(&mut self, container: &Self::Handle, rect: &OverlayRect, class: &str) -> Result<()>;

    /// Appends the container as the last child of the document body.
    fn attach(&mut self, container: &Self::Handle) -> Result<()>;

    fn dispose(&mut self, container: &Self::Handle) -> Result<()>;
}
