//! Maps a flattened-text offset back to a position inside the tree.

use crate::error::{HighlightError, Result};
use crate::tree::{BoundaryPoint, NodeKind, TextTree};

/// Resolves `offset`, counted in the flattened text of `root`, to the text node
/// and local offset where it falls.
///
/// An offset on the border between two nodes resolves to the end of the earlier
/// one. Children without text are skipped.
pub fn resolve_offset<T: TextTree + ?Sized>(tree: &T, root: &T::Node, offset: usize) -> Result<BoundaryPoint<T::Node>> {
    if tree.node_kind(root) == NodeKind::Text {
        let len = tree.text_len(root);
        if offset <= len {
            return Ok(BoundaryPoint { node: root.clone(), offset });
        }
        return Err(HighlightError::OffsetOutOfRange { offset, len });
    }

    let mut remaining = offset;
    for child in tree.children(root) {
        let len = tree.text_len(&child);
        if len == 0 {
            continue;
        }
        if remaining > len {
            remaining -= len;
            continue;
        }
        match tree.node_kind(&child) {
            NodeKind::Text => return Ok(BoundaryPoint { node: child, offset: remaining }),
            NodeKind::Element => return resolve_offset(tree, &child, remaining),
            NodeKind::Other => {}
        }
    }
    Err(HighlightError::OffsetOutOfRange { offset, len: offset - remaining })
}
