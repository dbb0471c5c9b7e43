//! # Layout Engine
//!
//! Turns section content into pages of absolutely positioned draw
//! operations. Coordinates are PDF points with the origin at the top-left
//! corner of the page and `y` growing downwards.
//!
//! ## Pieces
//!
//! - [`cursor`] - vertical write position and the page-break test
//! - [`document`] - draw operations, pages and the finished document
//! - [`canvas`] - cursor + document under construction
//! - [`metrics`] - text measurement, truncation and wrapping
//! - [`table`] - tables that continue across pages with repeated headers
//!
//! ## Example
//!
//! ```rust
//! use report_core::layout::{Canvas, PageSetup, TextStyle};
//!
//! let mut canvas = Canvas::new(PageSetup::default());
//! canvas.text_line("Project Report", TextStyle::title());
//! let document = canvas.finish("demo");
//! assert_eq!(document.page_count(), 1);
//! ```

pub mod canvas;
pub mod cursor;
pub mod document;
pub mod metrics;
pub mod table;

pub use canvas::Canvas;
pub use cursor::LayoutCursor;
pub use document::{Align, Color, DocumentBuilder, DrawOp, Page, RenderedDocument, Stroke, TextStyle};
pub use table::{column_offsets, render_table, table_width, ColumnSpec, TableLayout, TableRow, TableStyle};

use serde::{Deserialize, Serialize};

/// Tolerance for floating point comparisons of vertical positions.
pub const EPSILON: f64 = 0.01;

/// Page dimensions and margins, in points.
///
/// `margin_bottom` includes the band reserved for the footer that is
/// stamped after all content is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageSetup {
    /// US Letter with 50pt margins and a 20pt footer band.
    pub fn letter() -> Self {
        PageSetup {
            width: 612.0,
            height: 792.0,
            margin_top: 50.0,
            margin_bottom: 70.0,
            margin_left: 50.0,
            margin_right: 50.0,
        }
    }

    /// ISO A4 with the same margins as [`PageSetup::letter`].
    pub fn a4() -> Self {
        PageSetup {
            width: 595.28,
            height: 841.89,
            ..PageSetup::letter()
        }
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest `y` content may reach.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn content_height(&self) -> f64 {
        self.content_bottom() - self.margin_top
    }

    pub fn is_finite(&self) -> bool {
        [
            self.width,
            self.height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup::letter()
    }
}

/// Report palette.
pub mod palette {
    use super::Color;

    pub const INK: Color = Color::rgb(0x1f, 0x29, 0x37);
    pub const MUTED: Color = Color::rgb(0x6b, 0x72, 0x80);
    pub const PRIMARY: Color = Color::rgb(0x1f, 0x3a, 0x5f);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RULE: Color = Color::rgb(0xd1, 0xd5, 0xdb);
    pub const ROW_PRIMARY: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const ROW_ALTERNATE: Color = Color::rgb(0xf3, 0xf4, 0xf6);
    pub const TOTAL_FILL: Color = Color::rgb(0xe5, 0xe7, 0xeb);
    pub const CARD_FILL: Color = Color::rgb(0xf0, 0xf4, 0xf8);
    pub const SUCCESS: Color = Color::rgb(0x15, 0x80, 0x3d);
    pub const WARNING: Color = Color::rgb(0xb4, 0x53, 0x09);
    pub const DANGER: Color = Color::rgb(0xb9, 0x1c, 0x1c);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_geometry() {
        let setup = PageSetup::letter();
        assert_eq!(setup.content_width(), 512.0);
        assert_eq!(setup.content_bottom(), 722.0);
        assert_eq!(setup.content_height(), 672.0);
    }

    #[test]
    fn test_a4_keeps_margins() {
        let setup = PageSetup::a4();
        assert_eq!(setup.margin_left, 50.0);
        assert!(setup.height > PageSetup::letter().height);
    }

    #[test]
    fn test_is_finite() {
        assert!(PageSetup::a4().is_finite());
        let broken = PageSetup {
            margin_right: f64::NAN,
            ..PageSetup::letter()
        };
        assert!(!broken.is_finite());
    }
}
