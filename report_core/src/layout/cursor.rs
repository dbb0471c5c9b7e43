//! Vertical write position and the page-break test.
//!
//! Every block of known height goes through [`LayoutCursor::ensure_space`]
//! *before* it is drawn, never after.

use super::{PageSetup, EPSILON};

/// Tracks `(page_index, y)` for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    setup: PageSetup,
    page_index: usize,
    y: f64,
}

impl LayoutCursor {
    pub fn new(setup: PageSetup) -> Self {
        LayoutCursor {
            setup,
            page_index: 0,
            y: setup.margin_top,
        }
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// `page_height − bottom_margin − y`
    pub fn remaining_space(&self) -> f64 {
        self.setup.content_bottom() - self.y
    }

    /// True while nothing has been written below the top margin of the page.
    pub fn at_page_top(&self) -> bool {
        (self.y - self.setup.margin_top).abs() < EPSILON
    }

    /// Break to a new page if `required_height` does not fit.
    ///
    /// Returns whether a break occurred. A cursor sitting at the top of a
    /// page never breaks: a block taller than a whole page is drawn there
    /// rather than producing an endless run of blank pages.
    pub fn ensure_space(&mut self, required_height: f64) -> bool {
        if required_height > self.remaining_space() + EPSILON && !self.at_page_top() {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Move down after a write.
    pub fn advance(&mut self, height: f64) {
        self.y += height;
    }

    /// Move down by up to `height`, stopping at the content bottom.
    ///
    /// Used for spacing, which may be swallowed at a page bottom.
    pub fn advance_clamped(&mut self, height: f64) {
        self.y = (self.y + height).min(self.setup.content_bottom());
    }

    /// Start a new page and put the cursor at its top margin.
    pub fn reset(&mut self) {
        self.page_index += 1;
        self.y = self.setup.margin_top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> LayoutCursor {
        LayoutCursor::new(PageSetup::letter())
    }

    #[test]
    fn test_starts_at_top_margin() {
        let c = cursor();
        assert_eq!(c.page_index(), 0);
        assert_eq!(c.y(), 50.0);
        assert_eq!(c.remaining_space(), 672.0);
        assert!(c.at_page_top());
    }

    #[test]
    fn test_ensure_space_without_break() {
        let mut c = cursor();
        c.advance(600.0);
        assert!(!c.ensure_space(72.0));
        assert_eq!(c.page_index(), 0);
        assert_eq!(c.y(), 650.0);
    }

    #[test]
    fn test_ensure_space_breaks_when_short() {
        let mut c = cursor();
        c.advance(600.0);
        assert!(c.ensure_space(72.5));
        assert_eq!(c.page_index(), 1);
        assert_eq!(c.y(), 50.0);
    }

    #[test]
    fn test_no_break_at_page_top_for_oversize_block() {
        let mut c = cursor();
        assert!(!c.ensure_space(10_000.0));
        assert_eq!(c.page_index(), 0);
    }

    #[test]
    fn test_advance_clamped_stops_at_bottom() {
        let mut c = cursor();
        c.advance(660.0);
        c.advance_clamped(40.0);
        assert_eq!(c.y(), 722.0);
        assert_eq!(c.remaining_space(), 0.0);
    }

    #[test]
    fn test_reset_moves_to_next_page() {
        let mut c = cursor();
        c.advance(10.0);
        c.reset();
        c.reset();
        assert_eq!(c.page_index(), 2);
        assert!(c.at_page_top());
    }
}
