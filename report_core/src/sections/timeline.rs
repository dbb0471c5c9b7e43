//! Schedule dates, duration and progress at generation time.

use chrono::{DateTime, Utc};

use crate::layout::{palette, Canvas, TextStyle};
use crate::project::ScheduleStatus;

use super::{key_value, key_value_styled, section_heading, SectionContext};

pub fn render(ctx: &SectionContext<'_>, canvas: &mut Canvas) -> bool {
    let project = ctx.project;
    if project.start_date.is_none() && project.end_date.is_none() {
        return false;
    }
    section_heading(canvas, "Timeline");

    let or_unset = |date: Option<DateTime<Utc>>| date.map(|d| ctx.date(&d)).unwrap_or_else(|| "Not set".to_string());
    key_value(canvas, "Start Date", &or_unset(project.start_date));
    key_value(canvas, "End Date", &or_unset(project.end_date));

    if let Some(days) = project.duration_days() {
        let unit = if days == 1 { "day" } else { "days" };
        key_value(canvas, "Duration", &format!("{days} {unit}"));
    }
    if let Some(progress) = project.progress(ctx.generated_at) {
        let value = format!("{}, {}", progress.label(), ctx.percent(f64::from(progress.percent())));
        key_value(canvas, "Progress", &value);
    }
    if let Some(status) = project.schedule_status(ctx.generated_at) {
        let color = match status {
            ScheduleStatus::Delayed => palette::DANGER,
            ScheduleStatus::NotStarted => palette::MUTED,
            ScheduleStatus::OnSchedule | ScheduleStatus::Completed => palette::SUCCESS,
        };
        key_value_styled(canvas, "Schedule", status.message(), TextStyle::body().with_color(color));
    }
    true
}
