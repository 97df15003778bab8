//! Glyph cells: locating a character's cell document and reading its
//! geometry.
//!
//! # Architecture
//!
//! - [`CellLocator`]: maps a character to a cell name and a document path
//! - [`CellParser`]: reads one document into [`CellMetrics`]
//! - [`CellMetrics`]: sizes and advance used by the placement engine

pub mod locator;
pub mod parser;

use serde::Serialize;

pub use locator::CellLocator;
pub use parser::{parse_document, CellParser, ParseMode};

/// Axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
    pub top: i64,
}

impl Rect {
    #[must_use]
    pub fn new(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Fold `other` into this extent.
    ///
    /// `left`, `bottom` and `top` keep the minimum, `right` keeps the
    /// maximum. The `top` rule is fixed policy for glyph extents.
    pub fn absorb(&mut self, other: &Rect) {
        self.left = self.left.min(other.left);
        self.bottom = self.bottom.min(other.bottom);
        self.right = self.right.max(other.right);
        self.top = self.top.min(other.top);
    }

    /// `right - left`, or `None` if it does not fit in an `i64`.
    #[must_use]
    pub fn width(&self) -> Option<i64> {
        self.right.checked_sub(self.left)
    }

    /// `top - bottom`, or `None` if it does not fit in an `i64`.
    #[must_use]
    pub fn height(&self) -> Option<i64> {
        self.top.checked_sub(self.bottom)
    }
}

/// Geometry of one glyph cell.
///
/// Derived fields are computed once by the parser. Negative sizes are
/// kept as read; they point at malformed source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellMetrics {
    /// Cell name, e.g. `font_41`.
    pub cell: String,
    /// Format marker from the header (`magic`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Union of every rectangle on the tracked layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_extent: Option<Rect>,
    /// `FIXED_BBOX` property, which overrides the layer extent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_bbox: Option<Rect>,
    pub width: i64,
    pub height: i64,
    /// Horizontal cursor move after placing this glyph.
    pub advance: i64,
}

impl CellMetrics {
    /// Box that sizes the glyph: the explicit box if any, else the layer
    /// extent.
    #[must_use]
    pub fn sizing_box(&self) -> Option<&Rect> {
        self.explicit_bbox.as_ref().or(self.layer_extent.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_minimum_top() {
        let mut extent = Rect::new(0, 0, 10, 5);
        extent.absorb(&Rect::new(2, -3, 15, 8));
        assert_eq!(extent, Rect::new(0, -3, 15, 5));
    }

    #[test]
    fn negative_sizes_are_not_clamped() {
        let rect = Rect::new(10, 10, 4, 2);
        assert_eq!(rect.width(), Some(-6));
        assert_eq!(rect.height(), Some(-8));
    }

    #[test]
    fn overflowing_size_is_none() {
        let rect = Rect::new(i64::MIN, 0, 1, i64::MAX);
        assert_eq!(rect.width(), None);
        assert_eq!(rect.height(), Some(i64::MAX));
    }
}
