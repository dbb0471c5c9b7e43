//! Footer band stamped on every page once the page count is known.

use crate::layout::{metrics::fit_width, palette, Align, Canvas, DrawOp, PageSetup, Stroke, TextStyle};

use super::SectionContext;

const RULE_OFFSET: f64 = 14.0;
const TEXT_OFFSET: f64 = 20.0;

pub fn page_label(page: usize, total: usize) -> String {
    format!("Page {page} of {total}")
}

/// Footer operations for one page, drawn below the content area.
pub fn footer_ops(setup: &PageSetup, left: &str, right: &str, page: usize, total: usize) -> Vec<DrawOp> {
    let style = TextStyle::small();
    let x = setup.margin_left;
    let width = setup.content_width();
    let third = width / 3.0;
    let rule_y = setup.content_bottom() + RULE_OFFSET;
    let text_y = setup.content_bottom() + TEXT_OFFSET;

    let text = |dx: f64, content: &str, align: Align| DrawOp::Text {
        x: x + dx,
        y: text_y,
        width: third,
        text: fit_width(content, third, style.size),
        style,
        align,
    };

    vec![
        DrawOp::Line {
            x1: x,
            y1: rule_y,
            x2: x + width,
            y2: rule_y,
            stroke: Stroke::new(0.5, palette::RULE),
        },
        text(0.0, left, Align::Left),
        text(third, &page_label(page, total), Align::Center),
        text(2.0 * third, right, Align::Right),
    ]
}

/// Second layout pass: page numbering, project name and generation time.
pub fn stamp(ctx: &SectionContext<'_>, canvas: &mut Canvas) {
    let setup = *canvas.setup();
    let generated = format!("Generated {}", ctx.datetime(&ctx.generated_at));
    let name = ctx.project.name.clone();
    canvas.stamp(|page, total| footer_ops(&setup, &name, &generated, page, total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;
    use crate::stats::compute_stats;

    #[test]
    fn test_footer_below_content_area() {
        let setup = PageSetup::letter();
        let ops = footer_ops(&setup, "Clinic", "Generated now", 2, 5);
        assert_eq!(ops.len(), 4);
        for op in &ops {
            assert!(op.y() > setup.content_bottom());
            assert!(op.y() < setup.height);
        }
        assert_eq!(ops[2].text(), Some("Page 2 of 5"));
    }

    #[test]
    fn test_stamp_numbers_every_page() {
        let project = fixtures::project();
        let stats = compute_stats(&[]);
        let locale = fixtures::locale();
        let ctx = SectionContext {
            project: &project,
            materials: &[],
            stats: &stats,
            locale: &locale,
            generated_at: fixtures::generated_at(),
        };
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.text_line("first", TextStyle::body());
        canvas.new_page();
        canvas.text_line("second", TextStyle::body());
        stamp(&ctx, &mut canvas);
        let doc = canvas.finish("t");

        assert!(doc.pages()[0].contains_text("Page 1 of 2"));
        assert!(doc.pages()[1].contains_text("Page 2 of 2"));
        for page in doc.pages() {
            assert!(page.contains_text("Clinic Extension"));
            assert!(page.contains_text("Generated 6/1/2025 9:30:00 AM"));
        }
    }
}
