//! Materials grouped by category, one block per item.

use crate::layout::{Align, Canvas, TextStyle};
use crate::materials::{Material, MaterialCategory};

use super::materials_table::EMPTY_PLACEHOLDER;
use super::{section_heading, SectionContext};

const DETAIL_INDENT: f64 = 20.0;

/// Group materials by category, groups ordered by first appearance and
/// items kept in input order within a group.
pub fn group_by_category(materials: &[Material]) -> Vec<(MaterialCategory, Vec<&Material>)> {
    let mut groups: Vec<(MaterialCategory, Vec<&Material>)> = Vec::new();
    for material in materials {
        match groups.iter_mut().find(|(category, _)| *category == material.category) {
            Some((_, items)) => items.push(material),
            None => groups.push((material.category, vec![material])),
        }
    }
    groups
}

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    canvas.aligned_line(
        &format!("Materials List - {}", ctx.project.name),
        TextStyle::title().with_size(18.0),
        Align::Center,
    );
    canvas.gap(10.0);

    if ctx.materials.is_empty() {
        canvas.text_line(EMPTY_PLACEHOLDER, TextStyle::body().italic());
        return true;
    }

    for (i, (category, items)) in group_by_category(ctx.materials).into_iter().enumerate() {
        if i > 0 {
            canvas.gap(8.0);
        }
        section_heading(canvas, category.label());
        for material in items {
            item_block(ctx, canvas, material);
        }
    }
    true
}

fn item_block(ctx: &SectionContext<'_>, canvas: &mut Canvas, material: &Material) {
    let mut lines = vec![(
        format!("• {}", material.name),
        TextStyle::body().bold(),
        0.0,
    )];
    lines.push((
        format!(
            "Quantity: {} {} | Price: {}/unit | Total: {}",
            ctx.quantity(material.effective_quantity()),
            material.unit.symbol(),
            ctx.money(material.effective_unit_price()),
            ctx.money(material.effective_total()),
        ),
        TextStyle::body(),
        DETAIL_INDENT,
    ));
    if let Some(supplier) = material.supplier_name() {
        lines.push((format!("Supplier: {supplier}"), TextStyle::small(), DETAIL_INDENT));
    }

    let height: f64 = lines.iter().map(|(_, style, _)| style.line_height()).sum();
    canvas.ensure_space(height);
    for (text, style, indent) in lines {
        let (x, y, width) = (canvas.left() + indent, canvas.y(), canvas.content_width() - indent);
        canvas.text_at(x, y, width, &text, style, Align::Left);
        canvas.advance(style.line_height());
    }
    canvas.gap(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageSetup, RenderedDocument};
    use crate::materials::Unit;
    use crate::sections::fixtures;
    use crate::stats::compute_stats;

    fn render_with(materials: &[Material]) -> RenderedDocument {
        let project = fixtures::project();
        let stats = compute_stats(materials);
        let locale = fixtures::locale();
        let ctx = SectionContext {
            project: &project,
            materials,
            stats: &stats,
            locale: &locale,
            generated_at: fixtures::generated_at(),
        };
        let mut canvas = Canvas::new(PageSetup::letter());
        assert!(render(&ctx, &mut canvas));
        canvas.finish("t")
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let materials = vec![
            Material::new("Paint", MaterialCategory::Finishing, Unit::Liter, 1.0, 1.0),
            Material::new("Cement", MaterialCategory::Construction, Unit::Kg, 1.0, 1.0),
            Material::new("Varnish", MaterialCategory::Finishing, Unit::Liter, 1.0, 1.0),
        ];
        let groups = group_by_category(&materials);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, MaterialCategory::Finishing);
        let names: Vec<&str> = groups[0].1.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Paint", "Varnish"]);
    }

    #[test]
    fn test_item_lines() {
        let doc = render_with(&fixtures::materials());
        assert!(doc.contains_text("Materials List - Clinic Extension"));
        assert!(doc.contains_text("• Copper wire"));
        assert!(doc.contains_text("Quantity: 100 m | Price: $3.00/unit | Total: $300.00"));
        assert!(doc.contains_text("Supplier: Sonelec"));
    }

    #[test]
    fn test_item_blocks_never_split() {
        let materials: Vec<Material> = (0..60)
            .map(|i| {
                Material::new(format!("Tile {i}"), MaterialCategory::Finishing, Unit::Sqm, 4.0, 12.0)
                    .with_supplier("Ceramica")
            })
            .collect();
        let doc = render_with(&materials);
        assert!(doc.page_count() > 1);
        for i in 0..60 {
            let name_page = doc.find_page(&format!("• Tile {i}")).unwrap();
            let page = &doc.pages()[name_page];
            let texts: Vec<&str> = page.texts().collect();
            let at = texts.iter().position(|t| *t == format!("• Tile {i}")).unwrap();
            assert!(texts[at + 1].starts_with("Quantity:"));
            assert!(texts[at + 2].starts_with("Supplier:"));
        }
    }

    #[test]
    fn test_empty_list_placeholder() {
        let doc = render_with(&[]);
        assert!(doc.contains_text(EMPTY_PLACEHOLDER));
    }
}
