//! Budget against spend, plus the cost extremes.

use crate::layout::{palette, Canvas, Color, Stroke, TextStyle};
use crate::materials::Material;
use crate::project::BudgetUtilization;

use super::{key_value, key_value_styled, section_heading, SectionContext};

const BAR_HEIGHT: f64 = 10.0;

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    let usage = ctx.project.budget_utilization(ctx.stats.total);
    if ctx.stats.is_empty() && usage.is_none() {
        return false;
    }
    section_heading(canvas, "Financial Analysis");

    match usage {
        Some(usage) => budget_block(ctx, canvas, &usage),
        None => {
            key_value(canvas, "Budget", "Not set");
            key_value(canvas, "Spent", &ctx.money(ctx.stats.total));
        }
    }

    if !ctx.stats.is_empty() {
        key_value(canvas, "Average Item Cost", &ctx.money(ctx.stats.average));
        if let Some(material) = &ctx.stats.most_expensive {
            key_value(canvas, "Most Expensive", &priced_name(ctx, material));
        }
        if let Some(material) = &ctx.stats.least_expensive {
            key_value(canvas, "Least Expensive", &priced_name(ctx, material));
        }
        key_value(canvas, "Suppliers", &ctx.stats.supplier_count.to_string());
    }
    true
}

fn budget_block(ctx: &SectionContext<'_>, canvas: &mut Canvas, usage: &BudgetUtilization) {
    key_value(canvas, "Budget", &ctx.money(usage.budget));
    key_value(canvas, "Spent", &ctx.money(usage.spent));
    if usage.is_over {
        let style = TextStyle::body().bold().with_color(palette::DANGER);
        key_value_styled(canvas, "Over Budget", &ctx.money(-usage.remaining), style);
    } else {
        key_value(canvas, "Remaining", &ctx.money(usage.remaining));
    }

    let tone = tone_color(usage);
    key_value_styled(canvas, "Utilization", &ctx.percent(usage.percent), TextStyle::body().with_color(tone));
    utilization_bar(canvas, usage.percent, tone);
}

fn tone_color(usage: &BudgetUtilization) -> Color {
    if usage.is_over {
        palette::DANGER
    } else if usage.is_near {
        palette::WARNING
    } else {
        palette::SUCCESS
    }
}

fn utilization_bar(canvas: &mut Canvas, percent: f64, color: Color) {
    canvas.gap(2.0);
    canvas.ensure_space(BAR_HEIGHT);
    let (x, y, width) = (canvas.left(), canvas.y(), canvas.content_width());
    let filled = width * percent.clamp(0.0, 100.0) / 100.0;
    canvas.rect(x, y, width, BAR_HEIGHT, Some(palette::TOTAL_FILL), Some(Stroke::new(0.5, palette::RULE)));
    if filled > 0.0 {
        canvas.rect(x, y, filled, BAR_HEIGHT, Some(color), None);
    }
    canvas.advance(BAR_HEIGHT);
}

fn priced_name(ctx: &SectionContext<'_>, material: &Material) -> String {
    format!("{} ({})", material.name, ctx.money(material.effective_total()))
}
