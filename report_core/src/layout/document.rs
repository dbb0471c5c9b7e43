//! Draw operations, pages, and the finished document.
//!
//! A [`RenderedDocument`] is produced once by [`DocumentBuilder::finish`] and
//! exposes read-only accessors only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PageSetup;

/// sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Font settings for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

impl TextStyle {
    pub fn body() -> Self {
        TextStyle {
            size: 10.0,
            bold: false,
            italic: false,
            color: super::palette::INK,
        }
    }

    pub fn small() -> Self {
        TextStyle {
            size: 8.0,
            color: super::palette::MUTED,
            ..TextStyle::body()
        }
    }

    pub fn heading() -> Self {
        TextStyle {
            size: 14.0,
            bold: true,
            color: super::palette::PRIMARY,
            ..TextStyle::body()
        }
    }

    pub fn title() -> Self {
        TextStyle {
            size: 20.0,
            bold: true,
            color: super::palette::PRIMARY,
            ..TextStyle::body()
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Vertical space one line of this style occupies.
    pub fn line_height(&self) -> f64 {
        self.size * 1.4
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::body()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f64, color: Color) -> Self {
        Stroke { width, color }
    }
}

/// One positioned drawing operation. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    /// Single line of text aligned within `width`
    Text {
        x: f64,
        y: f64,
        width: f64,
        text: String,
        style: TextStyle,
        align: Align,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    /// Table cell text, vertically centered in its box
    Cell {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        padding: f64,
        text: String,
        style: TextStyle,
        align: Align,
    },
}

impl DrawOp {
    /// Text carried by the operation, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } | DrawOp::Cell { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            DrawOp::Text { y, .. } | DrawOp::Rect { y, .. } | DrawOp::Cell { y, .. } => *y,
            DrawOp::Line { y1, y2, .. } => y1.min(*y2),
        }
    }
}

/// One page of positioned operations, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// Mutable page list used while laying out.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    id: Uuid,
    setup: PageSetup,
    pages: Vec<Page>,
}

impl DocumentBuilder {
    /// Start a document with one empty page.
    pub fn new(setup: PageSetup) -> Self {
        DocumentBuilder {
            id: Uuid::new_v4(),
            setup,
            pages: vec![Page { number: 1, ops: Vec::new() }],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a new empty page.
    pub fn start_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page { number, ops: Vec::new() });
    }

    /// Draw onto the page at `index`, creating pages up to it if needed.
    pub fn push(&mut self, index: usize, op: DrawOp) {
        while self.pages.len() <= index {
            self.start_page();
        }
        self.pages[index].ops.push(op);
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Second pass over all pages once the final page count is known.
    pub fn stamp<F>(&mut self, mut overlay: F)
    where
        F: FnMut(usize, usize) -> Vec<DrawOp>,
    {
        let total = self.pages.len();
        for page in &mut self.pages {
            let ops = overlay(page.number, total);
            page.ops.extend(ops);
        }
    }

    /// Freeze the document.
    pub fn finish(self, title: impl Into<String>) -> RenderedDocument {
        RenderedDocument {
            id: self.id,
            title: title.into(),
            setup: self.setup,
            pages: self.pages,
        }
    }
}

/// The laid-out report: pages of positioned operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    id: Uuid,
    title: String,
    setup: PageSetup,
    pages: Vec<Page>,
}

impl RenderedDocument {
    /// Per-report identifier, used in logs and by callers to correlate output
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text in document order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Index of the first page whose text contains `needle`.
    pub fn find_page(&self, needle: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(needle))
    }
}
