//! The live page as a highlight host.

use common::error::{HighlightError, Result};
use common::geometry::{Rect, ScrollOffset};
use common::tree::{BoundaryPoint, LayoutQuery, NodeKind, TextTree, TextTreeMut};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CharacterData, Document, DomRect, Element, Node, Text};

pub(crate) fn host_error(err: JsValue) -> HighlightError {
    HighlightError::Host(format!("{:?}", err))
}

/// Reads text and geometry straight from the browser document.
#[derive(Debug, Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| HighlightError::Host("no window document".to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn as_text<'n>(&self, node: &'n Node) -> Result<&'n Text> {
        node.dyn_ref::<Text>().ok_or(HighlightError::NotText)
    }
}

fn to_rect(rect: &DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

impl TextTree for BrowserDom {
    type Node = Node;

    fn node_kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE | Node::CDATA_SECTION_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn first_child(&self, node: &Node) -> Option<Node> {
        node.first_child()
    }

    fn next_sibling(&self, node: &Node) -> Option<Node> {
        node.next_sibling()
    }

    fn text_content(&self, node: &Node) -> String {
        match self.node_kind(node) {
            NodeKind::Other => String::new(),
            _ => node.text_content().unwrap_or_default(),
        }
    }

    fn text_len(&self, node: &Node) -> usize {
        match (self.node_kind(node), node.dyn_ref::<CharacterData>()) {
            (NodeKind::Text, Some(data)) => data.length() as usize,
            _ => common::utf16::utf16_len(&self.text_content(node)),
        }
    }
}

impl TextTreeMut for BrowserDom {
    fn split_text(&mut self, node: &Node, offset: usize) -> Result<Node> {
        let text = self.as_text(node)?;
        let len = text.length() as usize;
        if offset > len {
            return Err(HighlightError::InvalidSplit { offset, len });
        }
        text.split_text(offset as u32).map(Node::from).map_err(host_error)
    }

    fn wrap_text(&mut self, node: &Node, class: &str) -> Result<Node> {
        self.as_text(node)?;
        let parent = node
            .parent_node()
            .ok_or_else(|| HighlightError::Host("text node is detached".to_string()))?;
        let marker = self.document.create_element("span").map_err(host_error)?;
        marker.class_list().add_1(class).map_err(host_error)?;
        parent.replace_child(&marker, node).map_err(host_error)?;
        marker.append_child(node).map_err(host_error)?;
        Ok(marker.into())
    }

    fn unwrap_marker(&mut self, marker: &Node) -> Result<()> {
        let parent = marker
            .parent_node()
            .ok_or_else(|| HighlightError::Host("marker is detached".to_string()))?;
        while let Some(child) = marker.first_child() {
            parent.insert_before(&child, Some(marker)).map_err(host_error)?;
        }
        parent.remove_child(marker).map_err(host_error)?;
        Ok(())
    }

    fn text_data(&self, node: &Node) -> Result<String> {
        Ok(self.as_text(node)?.data())
    }

    fn set_text_data(&mut self, node: &Node, data: &str) -> Result<()> {
        self.as_text(node)?.set_data(data);
        Ok(())
    }

    fn remove(&mut self, node: &Node) -> Result<()> {
        if let Some(parent) = node.parent_node() {
            parent.remove_child(node).map_err(host_error)?;
        }
        Ok(())
    }
}

impl LayoutQuery<BrowserDom> for BrowserDom {
    fn element_rect(&self, _tree: &BrowserDom, node: &Node) -> Result<Rect> {
        let element = node
            .dyn_ref::<Element>()
            .ok_or_else(|| HighlightError::Host("paragraph is not an element".to_string()))?;
        Ok(to_rect(&element.get_bounding_client_rect()))
    }

    fn caret_rect(&self, _tree: &BrowserDom, point: &BoundaryPoint<Node>) -> Result<Rect> {
        let range = self.document.create_range().map_err(host_error)?;
        range.set_start(&point.node, point.offset as u32).map_err(host_error)?;
        range.collapse_with_to_start(true);
        Ok(to_rect(&range.get_bounding_client_rect()))
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.document
            .document_element()
            .map(|root| ScrollOffset { x: f64::from(root.scroll_left()), y: f64::from(root.scroll_top()) })
            .unwrap_or_default()
    }
}
