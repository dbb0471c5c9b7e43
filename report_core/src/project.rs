//! # Project Records
//!
//! The `Project` struct is the read-only project record a report is built
//! from. It arrives fully resolved from the caller (the tracker's API layer)
//! as camelCase JSON; the core never mutates or persists it.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── identity: id, name, location, status
//! ├── money: budget (optional), total_cost (pre-computed)
//! ├── schedule: start_date, end_date (optional)
//! ├── text: description, notes
//! └── timestamps: created_at, updated_at
//! ```
//!
//! ## Example
//!
//! ```rust
//! use report_core::project::{Project, ProjectStatus};
//!
//! let project = Project::new("p-1", "Warehouse Extension", "Nouakchott")
//!     .with_status(ProjectStatus::InProgress)
//!     .with_budget(25_000.0);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("\"in-progress\""));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::{coerce_amount, lenient_f64, lenient_opt_f64};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    /// Wire name of the status (`"in-progress"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A construction project as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier from the persistence layer
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    pub location: String,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Estimated budget. `None` or `0` means no budget was set.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub budget: Option<f64>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Cost recorded on the project by the persistence layer
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_cost: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project record with the required fields and current timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            status: ProjectStatus::default(),
            budget: None,
            start_date: None,
            end_date: None,
            description: None,
            notes: None,
            total_cost: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_total_cost(mut self, total_cost: f64) -> Self {
        self.total_cost = total_cost;
        self
    }

    /// Budget if one was set (strictly positive after coercion).
    pub fn effective_budget(&self) -> Option<f64> {
        self.budget.map(coerce_amount).filter(|b| *b > 0.0)
    }

    /// Recorded total cost, with malformed values read as zero.
    pub fn effective_total_cost(&self) -> f64 {
        coerce_amount(self.total_cost)
    }

    /// Project duration in whole days (rounded up), when both dates are set.
    pub fn duration_days(&self) -> Option<i64> {
        let (start, end) = (self.start_date?, self.end_date?);
        let millis = (end - start).num_milliseconds().abs();
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        Some((millis + DAY_MS - 1) / DAY_MS)
    }

    /// Elapsed share of the scheduled window at `now`.
    pub fn progress(&self, now: DateTime<Utc>) -> Option<Progress> {
        let (start, end) = (self.start_date?, self.end_date?);
        if now < start {
            return Some(Progress::NotStarted);
        }
        if now > end {
            return Some(Progress::Overdue);
        }
        let total = (end - start).num_milliseconds();
        if total <= 0 {
            return Some(Progress::InProgress { percent: 100 });
        }
        let elapsed = (now - start).num_milliseconds();
        let percent = ((elapsed as f64 / total as f64) * 100.0).round() as u8;
        Some(Progress::InProgress { percent })
    }

    /// Whether the project is keeping to its schedule at `now`.
    pub fn schedule_status(&self, now: DateTime<Utc>) -> Option<ScheduleStatus> {
        let (start, end) = (self.start_date?, self.end_date?);
        if now < start {
            Some(ScheduleStatus::NotStarted)
        } else if now > end && self.status != ProjectStatus::Completed {
            Some(ScheduleStatus::Delayed)
        } else if now <= end {
            Some(ScheduleStatus::OnSchedule)
        } else {
            Some(ScheduleStatus::Completed)
        }
    }

    /// Budget consumption for a given spent amount; `None` without a budget.
    pub fn budget_utilization(&self, spent: f64) -> Option<BudgetUtilization> {
        let budget = self.effective_budget()?;
        let spent = coerce_amount(spent);
        let percent = spent / budget * 100.0;
        Some(BudgetUtilization {
            budget,
            spent,
            remaining: budget - spent,
            percent,
            is_over: percent > 100.0,
            is_near: percent > 90.0 && percent <= 100.0,
            is_under: percent < 90.0,
        })
    }
}

/// Schedule progress of a dated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Progress {
    NotStarted,
    InProgress { percent: u8 },
    Overdue,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        match self {
            Progress::NotStarted => 0,
            Progress::InProgress { percent } => *percent,
            Progress::Overdue => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Progress::NotStarted => "Not started",
            Progress::InProgress { .. } => "In progress",
            Progress::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    NotStarted,
    OnSchedule,
    Delayed,
    Completed,
}

impl ScheduleStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ScheduleStatus::NotStarted => "Project has not started yet",
            ScheduleStatus::OnSchedule => "Project is on schedule",
            ScheduleStatus::Delayed => "Project is past its end date",
            ScheduleStatus::Completed => "Project is completed",
        }
    }
}

/// Budget vs. spend comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetUtilization {
    pub budget: f64,
    pub spent: f64,
    /// Negative when over budget
    pub remaining: f64,
    pub percent: f64,
    pub is_over: bool,
    pub is_near: bool,
    pub is_under: bool,
}
