//! Rectangle math for the overlay pipeline.

use serde::{Deserialize, Serialize};

/// Vertical gap between two lines, in px, below which they count as adjacent.
/// Absorbs sub-pixel and line-height rounding.
pub const LINE_TOLERANCE_PX: f64 = 5.0;

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// One highlighted segment, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl OverlayRect {
    fn placed(width: f64, height: f64, left: f64, top: f64, scroll: ScrollOffset) -> Self {
        Self { width, height, left: scroll.x + left, top: scroll.y + top }
    }

    /// Inline CSS positioning the segment.
    pub fn css(&self) -> String {
        format!(
            "height: {}px; width: {}px; left: {}px; top: {}px;",
            self.height, self.width, self.left, self.top
        )
    }
}

/// Rectangles covering a match whose start and end carets are `start` and `end`
/// inside a paragraph occupying `paragraph`.
///
/// One rectangle when both carets sit on the same line. Otherwise a top segment
/// running to the paragraph's right edge and a bottom segment starting at its
/// left edge, plus a full-width middle segment when whole lines lie between them.
pub fn overlay_rects(paragraph: &Rect, start: &Rect, end: &Rect, scroll: ScrollOffset) -> Vec<OverlayRect> {
    if start.top == end.top {
        return vec![OverlayRect::placed(end.left - start.left, start.height, start.left, start.top, scroll)];
    }

    let mut rects = vec![
        OverlayRect::placed(paragraph.right() - start.left, start.height, start.left, start.top, scroll),
        OverlayRect::placed(end.left - paragraph.left, end.height, paragraph.left, end.top, scroll),
    ];
    let gap = end.top - start.bottom();
    if gap > LINE_TOLERANCE_PX {
        rects.push(OverlayRect::placed(paragraph.width, gap, paragraph.left, start.bottom(), scroll));
    }
    rects
}
