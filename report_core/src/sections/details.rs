//! Project information block.

use crate::format::{capitalize, sanitize_text};
use crate::layout::{Canvas, TextStyle};

use super::{key_value, section_heading, SectionContext, LABEL_WIDTH};

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    let project = ctx.project;
    section_heading(canvas, "Project Information");

    key_value(canvas, "Name", &project.name);
    key_value(canvas, "Location", &project.location);
    key_value(canvas, "Status", &capitalize(project.status.as_str()));
    key_value(canvas, "Created", &ctx.date(&project.created_at));
    key_value(canvas, "Last Updated", &ctx.date(&project.updated_at));

    let recorded = project.effective_total_cost();
    key_value(canvas, "Total Cost", &ctx.money(recorded));
    if (recorded - ctx.stats.total).abs() >= 0.005 {
        canvas.paragraph(
            &format!("Recorded cost differs from the materials total of {}.", ctx.money(ctx.stats.total)),
            TextStyle::small(),
            LABEL_WIDTH,
        );
    }

    let description = project.description.as_deref().map(sanitize_text).unwrap_or_default();
    if !description.is_empty() {
        canvas.gap(4.0);
        key_value(canvas, "Description", "");
        canvas.paragraph(&description, TextStyle::body(), LABEL_WIDTH);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSetup;
    use crate::sections::fixtures;
    use crate::stats::compute_stats;

    fn render_details(project: &crate::project::Project) -> crate::layout::RenderedDocument {
        let materials = fixtures::materials();
        let stats = compute_stats(&materials);
        let locale = fixtures::locale();
        let ctx = SectionContext {
            project,
            materials: &materials,
            stats: &stats,
            locale: &locale,
            generated_at: fixtures::generated_at(),
        };
        let mut canvas = Canvas::new(PageSetup::letter());
        render(&ctx, &mut canvas);
        canvas.finish("t")
    }

    #[test]
    fn test_details_lines() {
        let doc = render_details(&fixtures::project());
        assert!(doc.contains_text("Project Information"));
        assert!(doc.contains_text("Nouakchott"));
        assert!(doc.contains_text("In-progress"));
        assert!(doc.contains_text("1/10/2025"));
        assert!(doc.contains_text("$1,450.00"));
        assert!(doc.contains_text("differs from the materials total of $1,550.00"));
    }

    #[test]
    fn test_matching_cost_has_no_note() {
        let project = fixtures::project()
            .with_total_cost(1550.0)
            .with_description("Two-storey  extension\nwith lab");
        let doc = render_details(&project);
        assert!(!doc.contains_text("differs"));
        assert!(doc.contains_text("Two-storey extension with lab"));
    }
}
