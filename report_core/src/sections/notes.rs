//! Free-text project notes.

use crate::format::sanitize_paragraphs;
use crate::layout::{Canvas, TextStyle};

use super::{section_heading, SectionContext};

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    let paragraphs = ctx.project.notes.as_deref().map(sanitize_paragraphs).unwrap_or_default();
    if paragraphs.is_empty() {
        return false;
    }
    section_heading(canvas, "Notes");
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            canvas.gap(6.0);
        }
        canvas.paragraph(paragraph, TextStyle::body(), 0.0);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSetup;
    use crate::sections::fixtures;
    use crate::stats::compute_stats;

    fn render_notes(notes: Option<&str>) -> (bool, Vec<String>) {
        let mut project = fixtures::project();
        project.notes = notes.map(str::to_string);
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
        let rendered = render(&ctx, &mut canvas);
        let texts = canvas.finish("t").texts().map(str::to_string).collect();
        (rendered, texts)
    }

    #[test]
    fn test_blank_notes_skipped() {
        assert!(!render_notes(None).0);
        assert!(!render_notes(Some(" \n\t ")).0);
    }

    #[test]
    fn test_paragraphs_sanitized() {
        let (rendered, texts) = render_notes(Some("Pour slab\u{7} on Monday.\n\nCheck   rebar spacing."));
        assert!(rendered);
        assert_eq!(texts, vec!["Notes", "Pour slab on Monday.", "Check rebar spacing."]);
    }
}
