//! # Report Sections
//!
//! Each section is a plain function over a read-only [`SectionContext`] and
//! the shared [`Canvas`]. It returns `true` when it drew something; a section
//! that does not apply returns `false` without touching the canvas.
//!
//! The assembler walks one of the ordered lists below ([`PROJECT_REPORT`] or
//! [`MATERIALS_LIST`]), inserting [`SECTION_GAP`] after every section that
//! rendered, then stamps footers with [`footer::stamp`].

pub mod categories;
pub mod conclusions;
pub mod cover;
pub mod details;
pub mod financial;
pub mod footer;
pub mod materials_list;
pub mod materials_table;
pub mod notes;
pub mod timeline;

pub use conclusions::{derive_conclusions, Conclusion, Tone};

use chrono::{DateTime, Utc};

use crate::format::{format_currency, format_date, format_datetime, format_percent, format_quantity, Locale};
use crate::layout::{palette, Align, Canvas, Stroke, TextStyle};
use crate::materials::Material;
use crate::project::Project;
use crate::stats::Stats;

/// Vertical space between two rendered sections.
pub const SECTION_GAP: f64 = 16.0;

/// Width of the label column in key/value blocks.
pub const LABEL_WIDTH: f64 = 140.0;

/// Space a heading needs below it so it never ends a page on its own.
const HEADING_KEEP: f64 = 54.0;

/// Everything a section may read. Nothing in here is mutated while rendering.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub project: &'a Project,
    pub materials: &'a [Material],
    pub stats: &'a Stats,
    pub locale: &'a Locale,
    pub generated_at: DateTime<Utc>,
}

impl<'a> SectionContext<'a> {
    pub fn money(&self, value: f64) -> String {
        format_currency(value, self.locale)
    }

    pub fn percent(&self, value: f64) -> String {
        format_percent(value, self.locale)
    }

    pub fn quantity(&self, value: f64) -> String {
        format_quantity(value, self.locale)
    }

    pub fn date(&self, date: &DateTime<Utc>) -> String {
        format_date(date, self.locale)
    }

    pub fn datetime(&self, date: &DateTime<Utc>) -> String {
        format_datetime(date, self.locale)
    }
}

pub type SectionFn = fn(&SectionContext<'_>, &mut Canvas) -> bool;

/// A named entry in a report's section order.
#[derive(Clone, Copy)]
pub struct Section {
    pub name: &'static str,
    pub render: SectionFn,
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section").field("name", &self.name).finish()
    }
}

/// Full project report.
pub const PROJECT_REPORT: &[Section] = &[
    Section { name: "cover", render: cover::render },
    Section { name: "details", render: details::render },
    Section { name: "financial", render: financial::render },
    Section { name: "timeline", render: timeline::render },
    Section { name: "notes", render: notes::render },
    Section { name: "categories", render: categories::render },
    Section { name: "materials", render: materials_table::render },
    Section { name: "conclusions", render: conclusions::render },
];

/// Materials grouped by category.
pub const MATERIALS_LIST: &[Section] = &[Section {
    name: "materials-list",
    render: materials_list::render,
}];

/// Section heading with a rule underneath, kept with the content after it.
pub fn section_heading(canvas: &mut Canvas, title: &str) {
    canvas.ensure_space(HEADING_KEEP);
    canvas.text_line(title, TextStyle::heading());
    canvas.rule(Stroke::new(1.0, palette::PRIMARY));
    canvas.gap(6.0);
}

/// One `Label    value` line. The value is truncated to the line.
pub fn key_value(canvas: &mut Canvas, label: &str, value: &str) {
    key_value_styled(canvas, label, value, TextStyle::body());
}

pub fn key_value_styled(canvas: &mut Canvas, label: &str, value: &str, value_style: TextStyle) {
    let height = value_style.line_height().max(TextStyle::body().line_height());
    canvas.ensure_space(height);
    let (x, y, width) = (canvas.left(), canvas.y(), canvas.content_width());
    let label_style = TextStyle::body().bold().with_color(palette::MUTED);
    canvas.text_at(x, y, LABEL_WIDTH, label, label_style, Align::Left);
    canvas.text_at(x + LABEL_WIDTH, y, width - LABEL_WIDTH, value, value_style, Align::Left);
    canvas.advance(height);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::TimeZone;

    use super::*;
    use crate::format::Locale;
    use crate::materials::{MaterialCategory, Unit};
    use crate::project::ProjectStatus;

    pub fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    pub fn project() -> Project {
        let mut project = Project::new("p-1", "Clinic Extension", "Nouakchott")
            .with_status(ProjectStatus::InProgress)
            .with_budget(10_000.0)
            .with_total_cost(1_450.0);
        project.created_at = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        project.updated_at = Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap();
        project
    }

    pub fn materials() -> Vec<Material> {
        vec![
            Material::new("Cement", MaterialCategory::Construction, Unit::Kg, 2000.0, 0.5),
            Material::new("Copper wire", MaterialCategory::Electrical, Unit::Meter, 100.0, 3.0)
                .with_supplier("Sonelec"),
            Material::new("PVC pipe", MaterialCategory::Plumbing, Unit::Meter, 50.0, 2.0),
            Material::new("Paint", MaterialCategory::Finishing, Unit::Liter, 10.0, 15.0),
        ]
    }

    pub fn locale() -> Locale {
        Locale::en_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSetup;
    use crate::stats::compute_stats;

    #[test]
    fn test_section_orders() {
        let names: Vec<_> = PROJECT_REPORT.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["cover", "details", "financial", "timeline", "notes", "categories", "materials", "conclusions"]
        );
        assert_eq!(MATERIALS_LIST.len(), 1);
    }

    #[test]
    fn test_heading_not_left_at_page_bottom() {
        let mut canvas = Canvas::new(PageSetup::letter());
        let bottom = canvas.setup().content_bottom();
        canvas.advance(bottom - canvas.y() - 30.0);
        section_heading(&mut canvas, "Notes");
        assert_eq!(canvas.page_index(), 1);
    }

    #[test]
    fn test_context_formats_with_locale() {
        let project = fixtures::project();
        let materials = fixtures::materials();
        let stats = compute_stats(&materials);
        let locale = Locale::fr_mr();
        let ctx = SectionContext {
            project: &project,
            materials: &materials,
            stats: &stats,
            locale: &locale,
            generated_at: fixtures::generated_at(),
        };
        assert_eq!(ctx.money(1450.0), "1\u{a0}450,00\u{a0}MRU");
        assert_eq!(ctx.date(&fixtures::generated_at()), "01/06/2025");
    }
}
