//! Builds an in-memory [`Document`] from an HTML fragment.
//!
//! html5ever's tree builder does the parsing, so implied end tags, misnested
//! formatting elements and the other HTML recovery rules apply: `<p>a<p>b`
//! yields two sibling paragraphs. The body of the parsed document is copied
//! into the body of a [`Document`].

use common::dom::{Document, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements whose content is never rendered text.
const SKIP_TAGS: &[&str] = &["script", "style", "title", "template"];

/// Parses `html` into the body of a new document. Script, style and title
/// content is dropped.
pub fn parse_html(html: &str) -> Document {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);
    for error in &dom.errors {
        tracing::debug!("html parse error: {}", error);
    }

    let mut doc = Document::new();
    let body = doc.body();
    if let Some(source_body) = find_body(&dom.document) {
        for child in source_body.children.borrow().iter() {
            copy_node(&mut doc, child, body);
        }
    }
    doc
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            let tag_name: &str = &name.local;
            if tag_name == "body" {
                return Some(child.clone());
            }
            if tag_name == "html" {
                if let Some(body) = find_body(child) {
                    return Some(body);
                }
            }
        }
    }
    None
}

fn copy_node(doc: &mut Document, handle: &Handle, parent: NodeId) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let tag_name: &str = &name.local;
            if SKIP_TAGS.contains(&tag_name) {
                return;
            }
            let element = doc.create_element(tag_name);
            for attr in attrs.borrow().iter() {
                doc.set_attribute(element, &attr.name.local, &attr.value);
            }
            doc.append_child(parent, element);
            for child in handle.children.borrow().iter() {
                copy_node(doc, child, element);
            }
        }
        NodeData::Text { contents } => {
            let text = doc.create_text(&contents.borrow());
            doc.append_child(parent, text);
        }
        NodeData::Comment { contents } => {
            let comment = doc.create_comment(contents);
            doc.append_child(parent, comment);
        }
        _ => {}
    }
}
