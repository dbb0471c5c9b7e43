//! Per-category breakdown table.

use crate::layout::{render_table, Align, Canvas, ColumnSpec, TableRow, TableStyle};

use super::{section_heading, SectionContext};

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Category", 200.0, Align::Left),
        ColumnSpec::new("Items", 80.0, Align::Center),
        ColumnSpec::new("Total", 132.0, Align::Right),
        ColumnSpec::new("Share", 100.0, Align::Right),
    ]
}

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    let stats = ctx.stats;
    if stats.is_empty() {
        return false;
    }
    section_heading(canvas, "Category Analysis");

    let rows: Vec<TableRow> = stats
        .categories
        .iter()
        .map(|(category, slice)| {
            TableRow::new(vec![
                category.label().to_string(),
                slice.count.to_string(),
                ctx.money(slice.total),
                ctx.percent(stats.category_share(*category)),
            ])
        })
        .collect();
    let share = if stats.total > 0.0 { 100.0 } else { 0.0 };
    let total = TableRow::new(vec![
        "Total".to_string(),
        stats.count.to_string(),
        ctx.money(stats.total),
        ctx.percent(share),
    ]);

    render_table(canvas, &columns(), &rows, Some(&total), &TableStyle::default());
    true
}
