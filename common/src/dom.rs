//! In-memory document tree.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Structure is kept as
//! parent / first-child / last-child / sibling links on each node, so splitting
//! and wrapping text are O(1) relinks.

use crate::error::{HighlightError, Result};
use crate::geometry::OverlayRect;
use crate::tree::{NodeKind, OverlaySurface, TextTree, TextTreeMut};
use crate::utf16::{byte_index, utf16_len};

/// Index into the document arena.
pub type NodeId = u32;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Node { data, parent: None, first_child: None, last_child: None, prev_sibling: None, next_sibling: None }
    }
}

/// An arena document.
///
/// Detached nodes keep their slot: the text nodes and markers a tag highlighting
/// run splits off stay addressable so its log can undo it. Only subtrees handed
/// to [`Document::release`], such as disposed overlay containers, are recycled,
/// so a long-lived document grows with every tag highlighting run.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding a `body` element.
    pub fn new() -> Self {
        let mut doc = Document { nodes: vec![Node::new(NodeData::Document)], free: Vec::new(), body: 0 };
        let body = doc.create_element("body");
        doc.append_child(0, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Arena slots in use, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id as usize] = Node::new(data);
            return id;
        }
        self.nodes.push(Node::new(data));
        (self.nodes.len() - 1) as NodeId
    }

    /// Detaches `id` and frees the slots of its whole subtree for reuse. Ids
    /// into the subtree must not be used afterwards.
    pub fn release(&mut self, id: NodeId) {
        if id == self.root() || id == self.body {
            return;
        }
        self.detach(id);
        let mut released = self.descendants(id);
        released.push(id);
        for node in released {
            self.nodes[node as usize] = Node::new(NodeData::Comment(String::new()));
            self.free.push(node);
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element { tag: tag.to_ascii_lowercase(), attrs: vec![] })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let classes = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &classes);
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Unlinks `id` from its parent and siblings. The node keeps its own subtree.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = self.node(id);
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }
        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.node(parent).last_child;
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.prev_sibling = last;
        }
        match last {
            Some(last) => self.node_mut(last).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Inserts `node` as the sibling right before `reference`.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        self.detach(node);
        let (parent, prev) = {
            let r = self.node(reference);
            (r.parent, r.prev_sibling)
        };
        {
            let n = self.node_mut(node);
            n.parent = parent;
            n.prev_sibling = prev;
            n.next_sibling = Some(reference);
        }
        self.node_mut(reference).prev_sibling = Some(node);
        match (prev, parent) {
            (Some(prev), _) => self.node_mut(prev).next_sibling = Some(node),
            (None, Some(parent)) => self.node_mut(parent).first_child = Some(node),
            (None, None) => {}
        }
    }

    /// Inserts `node` as the sibling right after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        if let Some(next) = self.node(reference).next_sibling {
            self.insert_before(next, node);
        } else if let Some(parent) = self.node(reference).parent {
            self.append_child(parent, node);
        }
    }

    /// All nodes under `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(&id).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut children: Vec<NodeId> = self.children(&current).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|&node| self.attribute(node, "id") == Some(id))
    }

    pub fn elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root).into_iter().filter(|&node| self.has_class(node, class)).collect()
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(&id) {
            self.write_html(child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Document => {
                for child in self.children(&id) {
                    self.write_html(child, out);
                }
            }
            NodeData::Text(text) => escape_into(text, false, out),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in self.children(&id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

impl TextTree for Document {
    type Node = NodeId;

    fn node_kind(&self, node: &NodeId) -> NodeKind {
        match self.node(*node).data {
            NodeData::Element { .. } | NodeData::Document => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Other,
        }
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).first_child
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).next_sibling
    }

    fn text_content(&self, node: &NodeId) -> String {
        match &self.node(*node).data {
            NodeData::Text(text) => text.clone(),
            NodeData::Comment(_) => String::new(),
            _ => self
                .descendants(*node)
                .into_iter()
                .filter_map(|d| match &self.node(d).data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    fn text_len(&self, node: &NodeId) -> usize {
        match &self.node(*node).data {
            NodeData::Text(text) => utf16_len(text),
            NodeData::Comment(_) => 0,
            _ => self.children(node).map(|child| self.text_len(&child)).sum(),
        }
    }
}

impl TextTreeMut for Document {
    fn split_text(&mut self, node: &NodeId, offset: usize) -> Result<NodeId> {
        let NodeData::Text(text) = &self.node(*node).data else {
            return Err(HighlightError::NotText);
        };
        let Some(at) = byte_index(text, offset) else {
            return Err(HighlightError::InvalidSplit { offset, len: utf16_len(text) });
        };
        let tail = text[at..].to_string();
        let head = text[..at].to_string();
        self.node_mut(*node).data = NodeData::Text(head);
        let tail = self.create_text(&tail);
        self.insert_after(*node, tail);
        Ok(tail)
    }

    fn wrap_text(&mut self, node: &NodeId, class: &str) -> Result<NodeId> {
        if self.node_kind(node) != NodeKind::Text {
            return Err(HighlightError::NotText);
        }
        let marker = self.create_element("span");
        self.add_class(marker, class);
        self.insert_before(*node, marker);
        self.append_child(marker, *node);
        Ok(marker)
    }

    fn unwrap_marker(&mut self, marker: &NodeId) -> Result<()> {
        while let Some(child) = self.node(*marker).first_child {
            self.insert_before(*marker, child);
        }
        self.detach(*marker);
        Ok(())
    }

    fn text_data(&self, node: &NodeId) -> Result<String> {
        match &self.node(*node).data {
            NodeData::Text(text) => Ok(text.clone()),
            _ => Err(HighlightError::NotText),
        }
    }

    fn set_text_data(&mut self, node: &NodeId, data: &str) -> Result<()> {
        match &mut self.node_mut(*node).data {
            NodeData::Text(text) => {
                *text = data.to_string();
                Ok(())
            }
            _ => Err(HighlightError::NotText),
        }
    }

    fn remove(&mut self, node: &NodeId) -> Result<()> {
        self.detach(*node);
        Ok(())
    }
}

impl OverlaySurface for Document {
    type Handle = NodeId;

    fn create_container(&mut self, class: &str) -> Result<NodeId> {
        let container = self.create_element("div");
        self.add_class(container, class);
        Ok(container)
    }

    fn append_rect(&mut self, container: &NodeId, rect: &OverlayRect, class: &str) -> Result<()> {
        let item = self.create_element("div");
        self.add_class(item, class);
        self.set_attribute(item, "style", &rect.css());
        self.append_child(*container, item);
        Ok(())
    }

    fn attach(&mut self, container: &NodeId) -> Result<()> {
        self.append_child(self.body, *container);
        Ok(())
    }

    fn dispose(&mut self, container: &NodeId) -> Result<()> {
        self.release(*container);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, text: &str) -> NodeId {
        let p = doc.create_element("p");
        doc.append_child(doc.body(), p);
        let t = doc.create_text(text);
        doc.append_child(p, t);
        p
    }

    #[test]
    fn split_keeps_head_in_place_and_inserts_tail_after() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "hello world");
        let text = doc.first_child(&p).unwrap();
        let tail = doc.split_text(&text, 5).unwrap();
        assert_eq!(doc.text_data(&text).unwrap(), "hello");
        assert_eq!(doc.text_data(&tail).unwrap(), " world");
        assert_eq!(doc.next_sibling(&text), Some(tail));
        assert_eq!(doc.text_content(&p), "hello world");
    }

    #[test]
    fn split_rejects_positions_inside_a_surrogate_pair() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "a😀");
        let text = doc.first_child(&p).unwrap();
        assert_eq!(doc.split_text(&text, 2), Err(HighlightError::InvalidSplit { offset: 2, len: 3 }));
        assert_eq!(doc.split_text(&text, 4), Err(HighlightError::InvalidSplit { offset: 4, len: 3 }));
    }

    #[test]
    fn wrap_and_unwrap_round_trip_the_markup() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "abc");
        let text = doc.first_child(&p).unwrap();
        let marker = doc.wrap_text(&text, "mark").unwrap();
        assert_eq!(doc.outer_html(p), r#"<p><span class="mark">abc</span></p>"#);
        doc.unwrap_marker(&marker).unwrap();
        assert_eq!(doc.outer_html(p), "<p>abc</p>");
    }

    #[test]
    fn serializes_with_escaping() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "a < b & c");
        doc.set_attribute(p, "title", "\"q\"");
        let br = doc.create_element("br");
        doc.append_child(p, br);
        assert_eq!(doc.outer_html(p), r#"<p title="&quot;q&quot;">a &lt; b &amp; c<br></p>"#);
    }

    #[test]
    fn overlay_container_attaches_as_last_body_child() {
        let mut doc = Document::new();
        paragraph(&mut doc, "x");
        let container = doc.create_container("box").unwrap();
        doc.append_rect(&container, &OverlayRect { width: 1.0, height: 2.0, left: 3.0, top: 4.0 }, "item")
            .unwrap();
        doc.attach(&container).unwrap();
        assert_eq!(doc.children(&doc.body()).last(), Some(container));
        assert_eq!(
            doc.outer_html(container),
            r#"<div class="box"><div class="item" style="height: 2px; width: 1px; left: 3px; top: 4px;"></div></div>"#
        );
        doc.dispose(&container).unwrap();
        assert!(doc.elements_by_class(doc.root(), "box").is_empty());
    }

    #[test]
    fn disposed_overlays_are_recycled() {
        let mut doc = Document::new();
        paragraph(&mut doc, "x");
        let rect = OverlayRect { width: 1.0, height: 2.0, left: 3.0, top: 4.0 };
        let draw = |doc: &mut Document| {
            let container = doc.create_container("box").unwrap();
            doc.append_rect(&container, &rect, "item").unwrap();
            doc.append_rect(&container, &rect, "item").unwrap();
            doc.attach(&container).unwrap();
            container
        };
        let first = draw(&mut doc);
        let in_use = doc.node_count();
        doc.dispose(&first).unwrap();
        assert_eq!(doc.node_count(), in_use - 3);
        draw(&mut doc);
        assert_eq!(doc.node_count(), in_use);
        assert_eq!(doc.outer_html(doc.body()).matches("class=\"item\"").count(), 2);
    }

    #[test]
    fn release_ignores_the_body() {
        let mut doc = Document::new();
        paragraph(&mut doc, "x");
        let body = doc.body();
        doc.release(body);
        assert_eq!(doc.inner_html(body), "<p>x</p>");
    }
}
