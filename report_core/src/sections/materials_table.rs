//! Detailed materials table, or a placeholder for an empty project.

use crate::layout::{render_table, Align, Canvas, ColumnSpec, TableRow, TableStyle, TextStyle};
use crate::materials::Material;

use super::{section_heading, SectionContext};

pub const EMPTY_PLACEHOLDER: &str = "No materials added to this project yet.";

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("#", 22.0, Align::Right),
        ColumnSpec::new("Material", 108.0, Align::Left),
        ColumnSpec::new("Category", 66.0, Align::Left),
        ColumnSpec::new("Unit", 32.0, Align::Center),
        ColumnSpec::new("Qty", 44.0, Align::Right),
        ColumnSpec::new("Unit Price", 76.0, Align::Right),
        ColumnSpec::new("Total", 96.0, Align::Right),
        ColumnSpec::new("Supplier", 68.0, Align::Left),
    ]
}

fn row(ctx: &SectionContext<'_>, index: usize, material: &Material) -> TableRow {
    TableRow::new(vec![
        (index + 1).to_string(),
        material.name.clone(),
        material.category.label().to_string(),
        material.unit.symbol().to_string(),
        ctx.quantity(material.effective_quantity()),
        ctx.money(material.effective_unit_price()),
        ctx.money(material.effective_total()),
        material.supplier_name().unwrap_or("-").to_string(),
    ])
}

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    section_heading(canvas, "Materials");

    if ctx.materials.is_empty() {
        canvas.text_line(EMPTY_PLACEHOLDER, TextStyle::body().italic());
        return true;
    }

    let rows: Vec<TableRow> = ctx
        .materials
        .iter()
        .enumerate()
        .map(|(i, material)| row(ctx, i, material))
        .collect();
    let mut total = vec![String::new(); 8];
    total[1] = "Total".to_string();
    total[6] = ctx.money(ctx.stats.total);

    let layout = render_table(canvas, &columns(), &rows, Some(&TableRow::new(total)), &TableStyle::default());
    log::debug!(
        "materials table: {} rows over {} page(s), header drawn {} time(s)",
        rows.len(),
        layout.pages.len(),
        layout.header_draws
    );
    true
}
