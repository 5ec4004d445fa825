//! Wraps matched character ranges in marker elements, splitting text nodes as needed.
//!
//! A range can cross any number of text nodes and element boundaries; each text
//! node it touches gets its own marker holding exactly the matched characters
//! that node contained. Every mutation is recorded in a [`HighlightLog`] so it
//! can be reverted.
//!
//! The walk runs over a [`LeafSnapshot`], the list of non-empty text nodes taken
//! once before any mutation. When a match ends inside a text node, the unmatched
//! tail produced by the split takes that node's slot in the snapshot, so later
//! matches never have to rediscover their position in the rewritten tree.

use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::tree::{NodeKind, TextTree, TextTreeMut};

#[derive(Debug, Clone, PartialEq)]
struct Leaf<N> {
    node: N,
    /// Offset of the leaf's first unit in the snapshot's flattened text.
    start: usize,
    len: usize,
}

/// The text nodes under a root, with their position in its flattened text.
#[derive(Debug, Clone)]
pub struct LeafSnapshot<N> {
    leaves: Vec<Leaf<N>>,
    cursor: usize,
    consumed: usize,
}

impl<N: Clone + PartialEq + std::fmt::Debug> LeafSnapshot<N> {
    /// Text nodes inside `root` (or `root` itself when it is a text node).
    pub fn capture<T: TextTree<Node = N> + ?Sized>(tree: &T, root: &N) -> Self {
        let mut snapshot = LeafSnapshot { leaves: Vec::new(), cursor: 0, consumed: 0 };
        let mut offset = 0;
        collect_leaves(tree, root, &mut offset, &mut snapshot.leaves);
        snapshot
    }

    /// Text nodes inside `node` and inside each of its following siblings.
    pub fn capture_from<T: TextTree<Node = N> + ?Sized>(tree: &T, node: &N) -> Self {
        let mut snapshot = LeafSnapshot { leaves: Vec::new(), cursor: 0, consumed: 0 };
        let mut offset = 0;
        let mut current = Some(node.clone());
        while let Some(sibling) = current {
            collect_leaves(tree, &sibling, &mut offset, &mut snapshot.leaves);
            current = tree.next_sibling(&sibling);
        }
        snapshot
    }
}

fn collect_leaves<T: TextTree + ?Sized>(tree: &T, node: &T::Node, offset: &mut usize, leaves: &mut Vec<Leaf<T::Node>>) {
    match tree.node_kind(node) {
        NodeKind::Text => {
            let len = tree.text_len(node);
            if len > 0 {
                leaves.push(Leaf { node: node.clone(), start: *offset, len });
                *offset += len;
            }
        }
        NodeKind::Element => {
            for child in tree.children(node) {
                collect_leaves(tree, &child, offset, leaves);
            }
        }
        NodeKind::Other => {}
    }
}

/// One text node rewritten by the inserter.
#[derive(Debug, Clone, PartialEq)]
pub struct Splice<N> {
    /// The text node that was split; after the splice it holds the text before the match.
    pub node: N,
    /// Its text before the splice.
    pub original: String,
    pub marker: N,
    /// Text nodes created by splitting `node`.
    pub tails: Vec<N>,
    /// Ordinal of the match this marker belongs to, counted per log.
    pub match_index: usize,
}

/// Record of every splice applied by a tag highlighting run, in order.
#[derive(Debug, Clone)]
pub struct HighlightLog<N> {
    splices: Vec<Splice<N>>,
    matches: usize,
}

impl<N> Default for HighlightLog<N> {
    fn default() -> Self {
        HighlightLog { splices: Vec::new(), matches: 0 }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> HighlightLog<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn splices(&self) -> &[Splice<N>] {
        &self.splices
    }

    /// Number of matches wrapped, each of which may own several markers.
    pub fn match_count(&self) -> usize {
        self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }

    /// Reverts every splice, newest first. Each text node gets its original text
    /// back and the markers and split-off tails leave the tree.
    pub fn undo<T: TextTreeMut<Node = N> + ?Sized>(self, tree: &mut T) -> Result<()> {
        for splice in self.splices.into_iter().rev() {
            tree.unwrap_marker(&splice.marker)?;
            for tail in &splice.tails {
                tree.remove(tail)?;
            }
            tree.set_text_data(&splice.node, &splice.original)?;
        }
        Ok(())
    }
}

/// Wraps successive, non-overlapping ranges of one snapshot.
pub struct TagInserter<'c, N> {
    snapshot: LeafSnapshot<N>,
    class: &'c str,
}

impl<'c, N: Clone + PartialEq + std::fmt::Debug> TagInserter<'c, N> {
    pub fn new(snapshot: LeafSnapshot<N>, class: &'c str) -> Self {
        TagInserter { snapshot, class }
    }

    /// Wraps `[start, start + length)` of the snapshot's flattened text, recording
    /// each splice in `log` as soon as it is applied.
    ///
    /// Ranges must come in increasing order. If the snapshot ends before the range
    /// does, the part that fits stays wrapped and `MatchOverrun` is returned.
    pub fn wrap<T: TextTreeMut<Node = N> + ?Sized>(
        &mut self,
        tree: &mut T,
        start: usize,
        length: usize,
        log: &mut HighlightLog<N>,
    ) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        if start < self.snapshot.consumed {
            return Err(HighlightError::OutOfOrder { start, previous_end: self.snapshot.consumed });
        }
        let end = start + length;
        let match_index = log.matches;
        log.matches += 1;

        let leaves = &mut self.snapshot.leaves;
        let mut index = self.snapshot.cursor;
        while index < leaves.len() && leaves[index].start + leaves[index].len <= start {
            index += 1;
        }

        let mut pos = start;
        while pos < end {
            let Some(leaf) = leaves.get(index).cloned() else {
                self.snapshot.cursor = index;
                self.snapshot.consumed = pos;
                return Err(HighlightError::MatchOverrun { unplaced: end - pos });
            };
            let local = pos - leaf.start;
            let take = (leaf.len - local).min(end - pos);
            let rest = leaf.len - local - take;

            let original = tree.text_data(&leaf.node)?;
            let mut tails = Vec::new();
            let matched = if local > 0 {
                let tail = tree.split_text(&leaf.node, local)?;
                tails.push(tail.clone());
                tail
            } else {
                leaf.node.clone()
            };
            let after = if rest > 0 {
                let after = tree.split_text(&matched, take)?;
                tails.push(after.clone());
                Some(after)
            } else {
                None
            };
            let marker = tree.wrap_text(&matched, self.class)?;
            debug!(start = pos, len = take, "wrapped text run");
            log.splices.push(Splice { node: leaf.node, original, marker, tails, match_index });

            pos += take;
            match after {
                Some(after) => leaves[index] = Leaf { node: after, start: pos, len: rest },
                None => index += 1,
            }
        }

        self.snapshot.cursor = index;
        self.snapshot.consumed = end;
        Ok(())
    }
}

/// Wraps `[start, start + length)` of the text flowing from `node` through its
/// following siblings in marker elements of class `class`.
pub fn insert_markers<T: TextTreeMut + ?Sized>(
    tree: &mut T,
    node: &T::Node,
    start: usize,
    length: usize,
    class: &str,
) -> Result<HighlightLog<T::Node>> {
    let mut log = HighlightLog::new();
    let snapshot = LeafSnapshot::capture_from(tree, node);
    TagInserter::new(snapshot, class).wrap(tree, start, length, &mut log)?;
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeId};
    use crate::text_highlight::TAG_HIGHLIGHT_CLASS;

    fn span_with(doc: &mut Document, build: impl FnOnce(&mut Document, NodeId)) -> NodeId {
        let span = doc.create_element("span");
        doc.append_child(doc.body(), span);
        build(doc, span);
        span
    }

    fn text(doc: &mut Document, parent: NodeId, value: &str) {
        let node = doc.create_text(value);
        doc.append_child(parent, node);
    }

    fn element(doc: &mut Document, parent: NodeId, tag: &str, value: &str) -> NodeId {
        let node = doc.create_element(tag);
        doc.append_child(parent, node);
        text(doc, node, value);
        node
    }

    fn marker_texts(doc: &Document, root: NodeId) -> Vec<String> {
        doc.elements_by_class(root, TAG_HIGHLIGHT_CLASS).into_iter().map(|m| doc.inner_html(m)).collect()
    }

    fn highlight(doc: &mut Document, root: NodeId, term: &str) -> HighlightLog<NodeId> {
        let content = doc.text_content(&root);
        let start = crate::scanner::find_matches(&content, term)[0];
        insert_markers(doc, &root, start, crate::utf16::utf16_len(term), TAG_HIGHLIGHT_CLASS).unwrap()
    }

    #[test]
    fn match_inside_one_text_node() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| text(doc, span, "你好，很高兴见到你"));
        highlight(&mut doc, root, "高兴");
        assert_eq!(marker_texts(&doc, root), vec!["高兴"]);
        assert_eq!(doc.inner_html(root), r#"你好，很<span class="tag-highlight">高兴</span>见到你"#);
    }

    #[test]
    fn match_split_across_an_element_boundary() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| {
            text(doc, span, "你好，很高");
            element(doc, span, "span", "兴见到");
            text(doc, span, "你");
        });
        highlight(&mut doc, root, "高兴");
        assert_eq!(marker_texts(&doc, root), vec!["高", "兴"]);
        assert_eq!(
            doc.inner_html(root),
            r#"你好，很<span class="tag-highlight">高</span><span><span class="tag-highlight">兴</span>见到</span>你"#
        );
    }

    #[test]
    fn leading_whitespace_and_nested_element() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| {
            text(doc, span, " ");
            element(doc, span, "span", "你好，很高");
            text(doc, span, "兴见到你 ");
        });
        highlight(&mut doc, root, "高兴");
        assert_eq!(marker_texts(&doc, root), vec!["高", "兴"]);
        assert_eq!(doc.text_content(&root), " 你好，很高兴见到你 ");
    }

    #[test]
    fn match_spanning_three_nodes() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| {
            text(doc, span, "xa");
            element(doc, span, "b", "b");
            element(doc, span, "i", "cy");
        });
        let log = highlight(&mut doc, root, "abc");
        assert_eq!(marker_texts(&doc, root), vec!["a", "b", "c"]);
        assert_eq!(log.match_count(), 1);
        assert!(log.splices().iter().all(|s| s.match_index == 0));
    }

    #[test]
    fn overflow_continues_into_following_siblings() {
        let mut doc = Document::new();
        let first = span_with(&mut doc, |doc, span| text(doc, span, "abc"));
        let second = span_with(&mut doc, |doc, span| text(doc, span, "def"));
        insert_markers(&mut doc, &first, 2, 2, TAG_HIGHLIGHT_CLASS).unwrap();
        assert_eq!(marker_texts(&doc, first), vec!["c"]);
        assert_eq!(marker_texts(&doc, second), vec!["d"]);
    }

    #[test]
    fn successive_matches_in_one_text_node_reuse_the_tail() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| text(doc, span, "axbxc"));
        let mut log = HighlightLog::new();
        let mut inserter = TagInserter::new(LeafSnapshot::capture(&doc, &root), TAG_HIGHLIGHT_CLASS);
        inserter.wrap(&mut doc, 1, 1, &mut log).unwrap();
        inserter.wrap(&mut doc, 3, 1, &mut log).unwrap();
        assert_eq!(
            doc.inner_html(root),
            r#"a<span class="tag-highlight">x</span>b<span class="tag-highlight">x</span>c"#
        );
        assert_eq!(log.match_count(), 2);
        assert_eq!(
            inserter.wrap(&mut doc, 2, 1, &mut log),
            Err(HighlightError::OutOfOrder { start: 2, previous_end: 4 })
        );
    }

    #[test]
    fn overrun_keeps_the_part_that_fits() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| text(doc, span, "abc"));
        let mut log = HighlightLog::new();
        let mut inserter = TagInserter::new(LeafSnapshot::capture(&doc, &root), TAG_HIGHLIGHT_CLASS);
        assert_eq!(
            inserter.wrap(&mut doc, 1, 5, &mut log),
            Err(HighlightError::MatchOverrun { unplaced: 3 })
        );
        assert_eq!(marker_texts(&doc, root), vec!["bc"]);
        assert_eq!(log.splices().len(), 1);
    }

    #[test]
    fn undo_restores_the_original_markup() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| {
            text(doc, span, "axb");
            element(doc, span, "em", "xbx");
            text(doc, span, "c");
        });
        let before = doc.outer_html(root);
        let mut log = HighlightLog::new();
        let mut inserter = TagInserter::new(LeafSnapshot::capture(&doc, &root), TAG_HIGHLIGHT_CLASS);
        for start in [1, 3, 5] {
            inserter.wrap(&mut doc, start, 1, &mut log).unwrap();
        }
        assert_eq!(marker_texts(&doc, root), vec!["x", "x", "x"]);
        log.undo(&mut doc).unwrap();
        assert_eq!(doc.outer_html(root), before);
    }

    #[test]
    fn zero_length_range_is_a_no_op() {
        let mut doc = Document::new();
        let root = span_with(&mut doc, |doc, span| text(doc, span, "abc"));
        let log = insert_markers(&mut doc, &root, 1, 0, TAG_HIGHLIGHT_CLASS).unwrap();
        assert!(log.is_empty());
        assert_eq!(doc.inner_html(root), "abc");
    }
}
