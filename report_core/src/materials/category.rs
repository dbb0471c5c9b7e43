//! Material categories used for grouping in statistics and tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification tag on a material.
///
/// Declaration order is the order categories appear in breakdown tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Construction,
    Electrical,
    Plumbing,
    Finishing,
    /// Unclassified materials, including unknown category names
    #[default]
    #[serde(other)]
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Construction,
        MaterialCategory::Electrical,
        MaterialCategory::Plumbing,
        MaterialCategory::Finishing,
        MaterialCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Construction => "construction",
            MaterialCategory::Electrical => "electrical",
            MaterialCategory::Plumbing => "plumbing",
            MaterialCategory::Finishing => "finishing",
            MaterialCategory::Other => "other",
        }
    }

    /// Human-facing label ("Construction")
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Construction => "Construction",
            MaterialCategory::Electrical => "Electrical",
            MaterialCategory::Plumbing => "Plumbing",
            MaterialCategory::Finishing => "Finishing",
            MaterialCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
