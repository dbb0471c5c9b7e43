//! A cursor bound to the document it writes into.
//!
//! Renderers receive `&mut Canvas`; a page break taken through
//! [`Canvas::ensure_space`] both moves the cursor and instantiates the next
//! page, so the two can never disagree.

use log::debug;

use super::cursor::LayoutCursor;
use super::document::{Align, DocumentBuilder, DrawOp, RenderedDocument, Stroke, TextStyle};
use super::metrics::{fit_width, wrap};
use super::{Color, PageSetup};

pub struct Canvas {
    cursor: LayoutCursor,
    builder: DocumentBuilder,
}

impl Canvas {
    pub fn new(setup: PageSetup) -> Self {
        Canvas {
            cursor: LayoutCursor::new(setup),
            builder: DocumentBuilder::new(setup),
        }
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn setup(&self) -> &PageSetup {
        self.builder.setup()
    }

    pub fn page_index(&self) -> usize {
        self.cursor.page_index()
    }

    pub fn page_count(&self) -> usize {
        self.builder.page_count()
    }

    pub fn y(&self) -> f64 {
        self.cursor.y()
    }

    pub fn left(&self) -> f64 {
        self.setup().margin_left
    }

    pub fn content_width(&self) -> f64 {
        self.setup().content_width()
    }

    pub fn remaining_space(&self) -> f64 {
        self.cursor.remaining_space()
    }

    /// Break to a new page if `height` does not fit. Returns whether it broke.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        let broke = self.cursor.ensure_space(height);
        if broke {
            self.builder.start_page();
            debug!(
                "page break before block of {:.1}pt, now on page {}",
                height,
                self.cursor.page_index() + 1
            );
        }
        broke
    }

    pub fn advance(&mut self, height: f64) {
        self.cursor.advance(height);
    }

    /// Vertical spacing; swallowed at the bottom of a page.
    pub fn gap(&mut self, height: f64) {
        self.cursor.advance_clamped(height);
    }

    /// Force the next content onto a fresh page (no-op on an untouched page).
    pub fn new_page(&mut self) {
        if self.cursor.at_page_top() {
            return;
        }
        self.cursor.reset();
        self.builder.start_page();
    }

    /// Draw onto the current page without moving the cursor.
    pub fn draw(&mut self, op: DrawOp) {
        self.builder.push(self.cursor.page_index(), op);
    }

    /// Text at an explicit position on the current page.
    pub fn text_at(&mut self, x: f64, y: f64, width: f64, text: &str, style: TextStyle, align: Align) {
        self.draw(DrawOp::Text {
            x,
            y,
            width,
            text: fit_width(text, width, style.size),
            style,
            align,
        });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        self.draw(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.draw(DrawOp::Line { x1, y1, x2, y2, stroke });
    }

    /// One full-width line of text at the cursor, truncated to fit.
    pub fn text_line(&mut self, text: &str, style: TextStyle) {
        self.aligned_line(text, style, Align::Left);
    }

    pub fn aligned_line(&mut self, text: &str, style: TextStyle, align: Align) {
        let height = style.line_height();
        self.ensure_space(height);
        let (x, y, width) = (self.left(), self.y(), self.content_width());
        self.text_at(x, y, width, text, style, align);
        self.advance(height);
    }

    /// Word-wrapped paragraph at the cursor, one page-break check per line.
    pub fn paragraph(&mut self, text: &str, style: TextStyle, indent: f64) {
        let width = self.content_width() - indent;
        for line in wrap(text, width, style.size) {
            let height = style.line_height();
            self.ensure_space(height);
            let (x, y) = (self.left() + indent, self.y());
            self.text_at(x, y, width, &line, style, Align::Left);
            self.advance(height);
        }
    }

    /// Horizontal rule across the content width at the cursor.
    pub fn rule(&mut self, stroke: Stroke) {
        let (x, y, w) = (self.left(), self.y(), self.content_width());
        self.line(x, y, x + w, y, stroke);
    }

    /// Second layout pass over every page, once the page count is final.
    pub fn stamp<F>(&mut self, overlay: F)
    where
        F: FnMut(usize, usize) -> Vec<DrawOp>,
    {
        self.builder.stamp(overlay);
    }

    pub fn finish(self, title: impl Into<String>) -> RenderedDocument {
        self.builder.finish(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::palette;

    #[test]
    fn test_text_line_advances_by_line_height() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.text_line("hello", TextStyle::body());
        assert!((canvas.y() - 64.0).abs() < 1e-9);
        let doc = canvas.finish("t");
        assert_eq!(doc.pages()[0].ops.len(), 1);
    }

    #[test]
    fn test_break_instantiates_page() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.advance(660.0);
        assert!(canvas.ensure_space(20.0));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.page_index(), 1);
    }

    #[test]
    fn test_paragraph_flows_onto_next_page() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.advance(650.0);
        let text = "word ".repeat(400);
        canvas.paragraph(&text, TextStyle::body(), 0.0);
        let bottom = canvas.setup().content_bottom();
        let doc = canvas.finish("t");
        assert!(doc.page_count() >= 2);
        for page in doc.pages() {
            for op in &page.ops {
                assert!(op.y() + TextStyle::body().line_height() <= bottom + 1e-6);
            }
        }
    }

    #[test]
    fn test_new_page_is_noop_at_top() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.new_page();
        assert_eq!(canvas.page_count(), 1);
        canvas.rule(Stroke::new(0.5, palette::RULE));
        canvas.advance(1.0);
        canvas.new_page();
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn test_text_at_truncates() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.text_at(50.0, 50.0, 30.1, "abcdefghij", TextStyle::body(), Align::Left);
        let doc = canvas.finish("t");
        assert_eq!(doc.texts().next(), Some("abcd…"));
    }
}
