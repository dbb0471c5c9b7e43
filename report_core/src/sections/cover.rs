//! Title block and summary cards.

use crate::layout::{palette, Align, Canvas, TextStyle};

use super::SectionContext;

const CARD_HEIGHT: f64 = 54.0;
const CARD_GUTTER: f64 = 8.0;
const CARD_PADDING: f64 = 8.0;

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    canvas.aligned_line("Project Report", TextStyle::title(), Align::Center);
    canvas.aligned_line(&ctx.project.name, TextStyle::heading().with_color(palette::INK), Align::Center);
    if !ctx.project.location.trim().is_empty() {
        canvas.aligned_line(&ctx.project.location, TextStyle::body().with_color(palette::MUTED), Align::Center);
    }
    canvas.aligned_line(
        &format!("Generated on {}", ctx.datetime(&ctx.generated_at)),
        TextStyle::small(),
        Align::Center,
    );
    canvas.gap(12.0);

    let budget_used = match ctx.project.budget_utilization(ctx.stats.total) {
        Some(usage) => ctx.percent(usage.percent),
        None => "No budget".to_string(),
    };
    let cards = [
        ("Total Cost", ctx.money(ctx.stats.total)),
        ("Items", ctx.stats.count.to_string()),
        ("Average Cost", ctx.money(ctx.stats.average)),
        ("Budget Used", budget_used),
    ];
    summary_cards(canvas, &cards);
    true
}

fn summary_cards(canvas: &mut Canvas, cards: &[(&str, String)]) {
    canvas.ensure_space(CARD_HEIGHT);
    let count = cards.len() as f64;
    let width = (canvas.content_width() - CARD_GUTTER * (count - 1.0)) / count;
    let (left, y) = (canvas.left(), canvas.y());

    for (i, (label, value)) in cards.iter().enumerate() {
        let x = left + i as f64 * (width + CARD_GUTTER);
        let inner = width - 2.0 * CARD_PADDING;
        canvas.rect(x, y, width, CARD_HEIGHT, Some(palette::CARD_FILL), None);
        canvas.text_at(x + CARD_PADDING, y + CARD_PADDING, inner, label, TextStyle::small(), Align::Left);
        let value_style = TextStyle::body().with_size(11.0).bold();
        canvas.text_at(x + CARD_PADDING, y + 26.0, inner, value, value_style, Align::Left);
    }
    canvas.advance(CARD_HEIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DrawOp, PageSetup};
    use crate::sections::fixtures;
    use crate::stats::compute_stats;

    #[test]
    fn test_cover_cards() {
        let project = fixtures::project();
        let materials = fixtures::materials();
        let stats = compute_stats(&materials);
        let locale = fixtures::locale();
        let ctx = SectionContext {
            project: &project,
            materials: &materials,
            stats: &stats,
            locale: &locale,
            generated_at: fixtures::generated_at(),
        };
        let mut canvas = Canvas::new(PageSetup::letter());
        assert!(render(&ctx, &mut canvas));
        let doc = canvas.finish("t");

        assert!(doc.contains_text("Project Report"));
        assert!(doc.contains_text("Clinic Extension"));
        assert!(doc.contains_text("Generated on 6/1/2025 9:30:00 AM"));
        assert!(doc.contains_text("$1,550.00"));
        assert!(doc.contains_text("$387.50"));
        assert!(doc.contains_text("15.5%"));

        let cards = doc.pages()[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { fill: Some(f), .. } if *f == palette::CARD_FILL))
            .count();
        assert_eq!(cards, 4);
    }
}
