//! Fixed-pitch layout: geometry for documents rendered as preformatted text.
//!
//! Every UTF-16 unit takes one cell of `char_width_px`; paragraphs wrap at
//! `paragraph_width_px` and stack top to bottom, `paragraph_gap_px` apart.

use common::dom::{Document, NodeData, NodeId};
use common::error::{HighlightError, Result};
use common::geometry::{Rect, ScrollOffset};
use common::tree::{BoundaryPoint, LayoutQuery, TextTree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub char_width_px: f64,
    pub line_height_px: f64,
    pub paragraph_width_px: f64,
    pub paragraph_gap_px: f64,
    pub scroll: ScrollOffset,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            char_width_px: 8.0,
            line_height_px: 23.0,
            paragraph_width_px: 640.0,
            paragraph_gap_px: 0.0,
            scroll: ScrollOffset::default(),
        }
    }
}

impl GridLayout {
    pub fn new(char_width_px: f64, line_height_px: f64, paragraph_width_px: f64) -> Self {
        Self { char_width_px, line_height_px, paragraph_width_px, ..Self::default() }
    }

    /// Reads `HIGHLIGHT_CHAR_WIDTH_PX`, `HIGHLIGHT_LINE_HEIGHT_PX`,
    /// `HIGHLIGHT_PARAGRAPH_WIDTH_PX` and `HIGHLIGHT_PARAGRAPH_GAP_PX`, keeping
    /// the default for any that is unset or invalid.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            char_width_px: env_px("HIGHLIGHT_CHAR_WIDTH_PX", defaults.char_width_px, false),
            line_height_px: env_px("HIGHLIGHT_LINE_HEIGHT_PX", defaults.line_height_px, false),
            paragraph_width_px: env_px("HIGHLIGHT_PARAGRAPH_WIDTH_PX", defaults.paragraph_width_px, false),
            paragraph_gap_px: env_px("HIGHLIGHT_PARAGRAPH_GAP_PX", defaults.paragraph_gap_px, true),
            scroll: defaults.scroll,
        }
    }

    pub fn with_scroll(mut self, scroll: ScrollOffset) -> Self {
        self.scroll = scroll;
        self
    }

    /// Cells per line; at least one.
    pub fn columns(&self) -> usize {
        ((self.paragraph_width_px / self.char_width_px).floor() as usize).max(1)
    }

    /// Lays out the paragraphs of `container`.
    pub fn page(&self, doc: &Document, container: NodeId) -> PageLayout {
        let columns = self.columns();
        let mut top = 0.0;
        let blocks = doc
            .paragraphs(&container)
            .into_iter()
            .map(|node| {
                let len = doc.text_len(&node);
                let lines = len.div_ceil(columns).max(1);
                let block = Block { node, top, len, lines };
                top += lines as f64 * self.line_height_px + self.paragraph_gap_px;
                block
            })
            .collect();
        PageLayout { grid: *self, columns, blocks }
    }
}

fn env_px(name: &str, default: f64, allow_zero: bool) -> f64 {
    parse_px(name, std::env::var(name).ok(), default, allow_zero)
}

fn parse_px(name: &str, raw: Option<String>, default: f64, allow_zero: bool) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0)) => value,
        _ => {
            tracing::warn!("ignoring {}={:?}, using {}", name, raw, default);
            default
        }
    }
}

#[derive(Debug, Clone)]
struct Block {
    node: NodeId,
    top: f64,
    len: usize,
    lines: usize,
}

/// Geometry of one laid-out container.
#[derive(Debug, Clone)]
pub struct PageLayout {
    grid: GridLayout,
    columns: usize,
    blocks: Vec<Block>,
}

impl PageLayout {
    /// Total height of the laid-out paragraphs.
    pub fn height(&self) -> f64 {
        self.blocks
            .last()
            .map_or(0.0, |block| block.top + block.lines as f64 * self.grid.line_height_px)
    }

    fn block_of(&self, doc: &Document, node: NodeId) -> Result<&Block> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if let Some(block) = self.blocks.iter().find(|block| block.node == candidate) {
                return Ok(block);
            }
            current = doc.parent(candidate);
        }
        Err(HighlightError::Host(format!("node {} is outside the laid-out container", node)))
    }

    /// Offset of `point` in the flattened text of `block`.
    fn flat_offset(&self, doc: &Document, block: &Block, point: &BoundaryPoint<NodeId>) -> Result<usize> {
        if point.node == block.node {
            return Ok(point.offset);
        }
        let mut flat = 0;
        for node in doc.descendants(block.node) {
            if node == point.node {
                return Ok(flat + point.offset);
            }
            if let NodeData::Text(_) = doc.data(node) {
                flat += doc.text_len(&node);
            }
        }
        Err(HighlightError::Host(format!("node {} is not inside its block", point.node)))
    }
}

impl LayoutQuery<Document> for PageLayout {
    /// Box of the paragraph containing `node`.
    fn element_rect(&self, tree: &Document, node: &NodeId) -> Result<Rect> {
        let block = self.block_of(tree, *node)?;
        Ok(Rect::new(
            0.0,
            block.top,
            self.grid.paragraph_width_px,
            block.lines as f64 * self.grid.line_height_px,
        ))
    }

    /// A caret on a wrap position sits at the start of the next line, except at
    /// the very end of the paragraph.
    fn caret_rect(&self, tree: &Document, point: &BoundaryPoint<NodeId>) -> Result<Rect> {
        let block = self.block_of(tree, point.node)?;
        let flat = self.flat_offset(tree, block, point)?;
        let (row, col) = if flat > 0 && flat == block.len && flat % self.columns == 0 {
            (flat / self.columns - 1, self.columns)
        } else {
            (flat / self.columns, flat % self.columns)
        };
        Ok(Rect::new(
            col as f64 * self.grid.char_width_px,
            block.top + row as f64 * self.grid.line_height_px,
            0.0,
            self.grid.line_height_px,
        ))
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.grid.scroll
    }
}
