//! Closing statements derived from the project and its statistics.
//!
//! [`derive_conclusions`] is pure so the same inputs always yield the same
//! statements; [`render`] only lays them out.

use serde::{Deserialize, Serialize};

use crate::format::{format_currency, format_percent, Locale};
use crate::layout::{palette, Canvas, Color, TextStyle};
use crate::materials::MaterialCategory;
use crate::project::Project;
use crate::stats::Stats;

use super::{section_heading, SectionContext};

/// Item count above which supplier consolidation is suggested.
pub const CONSOLIDATION_THRESHOLD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Warning,
    Negative,
}

impl Tone {
    pub fn color(&self) -> Color {
        match self {
            Tone::Neutral => palette::INK,
            Tone::Positive => palette::SUCCESS,
            Tone::Warning => palette::WARNING,
            Tone::Negative => palette::DANGER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Conclusion {
    Summary { total: f64, count: usize },
    NoMaterials,
    /// Total at or under budget; `remaining >= 0`
    WithinBudget { remaining: f64 },
    /// Utilization above 90% but not over
    NearBudget { percent: f64 },
    /// Total above budget; `overage > 0`
    OverBudget { overage: f64 },
    ConsolidateSuppliers { count: usize },
    BroadenCoverage { category: MaterialCategory },
}

impl Conclusion {
    pub fn message(&self, locale: &Locale) -> String {
        match self {
            Conclusion::Summary { total, count } => {
                let noun = if *count == 1 { "item" } else { "items" };
                format!(
                    "Total material cost is {} across {count} {noun}.",
                    format_currency(*total, locale)
                )
            }
            Conclusion::NoMaterials => "No materials have been recorded for this project yet.".to_string(),
            Conclusion::WithinBudget { remaining } => format!(
                "The project is within budget with {} remaining.",
                format_currency(*remaining, locale)
            ),
            Conclusion::NearBudget { percent } => format!(
                "Budget utilization is at {}; spending is close to the limit.",
                format_percent(*percent, locale)
            ),
            Conclusion::OverBudget { overage } => format!(
                "The project is over budget by {}.",
                format_currency(*overage, locale)
            ),
            Conclusion::ConsolidateSuppliers { count } => format!(
                "With {count} items, consider consolidating suppliers to negotiate better prices."
            ),
            Conclusion::BroadenCoverage { category } => format!(
                "All materials are in the {} category; check that the other trades are covered.",
                category.label()
            ),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Conclusion::WithinBudget { .. } => Tone::Positive,
            Conclusion::NearBudget { .. } => Tone::Warning,
            Conclusion::OverBudget { .. } => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

/// Statements in display order: summary first, then budget, then advice.
pub fn derive_conclusions(project: &Project, stats: &Stats) -> Vec<Conclusion> {
    let mut out = Vec::new();

    if stats.is_empty() {
        out.push(Conclusion::NoMaterials);
    } else {
        out.push(Conclusion::Summary {
            total: stats.total,
            count: stats.count,
        });
    }

    if let Some(usage) = project.budget_utilization(stats.total) {
        if usage.spent > usage.budget {
            out.push(Conclusion::OverBudget {
                overage: usage.spent - usage.budget,
            });
        } else {
            out.push(Conclusion::WithinBudget {
                remaining: usage.remaining,
            });
            if usage.is_near {
                out.push(Conclusion::NearBudget { percent: usage.percent });
            }
        }
    }

    if stats.count > CONSOLIDATION_THRESHOLD {
        out.push(Conclusion::ConsolidateSuppliers { count: stats.count });
    }

    if stats.categories_used() == 1 {
        if let Some(category) = stats.categories.keys().next() {
            out.push(Conclusion::BroadenCoverage { category: *category });
        }
    }

    out
}

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    section_heading(canvas, "Conclusions");
    for conclusion in derive_conclusions(ctx.project, ctx.stats) {
        let style = TextStyle::body().with_color(conclusion.tone().color());
        canvas.paragraph(&format!("- {}", conclusion.message(ctx.locale)), style, 0.0);
        canvas.gap(3.0);
    }
    true
}
