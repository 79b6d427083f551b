//! The built-in enhancement catalog.
//!
//! These four enhancements are pure functions over a table; they never
//! touch a provider and never fail. Freeform (AI-driven) enhancement lives
//! in the structurer.

mod categories;
mod clean;
mod fill;
mod merge;

pub use categories::detect_categories;
pub use clean::clean_data;
pub use fill::fill_missing_values;
pub use merge::merge_similar_rows;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// A named, deterministic enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Enhancement {
    /// Drop empty rows, trim cells, normalize dates and currency.
    Clean,
    /// Append a per-row DataType summary column.
    DetectCategories,
    /// Collapse rows that agree on their key columns, summing numerics.
    MergeSimilarRows,
    /// Fill blanks with the column mean or mode.
    FillMissing,
}

impl Enhancement {
    /// Look up an enhancement by its display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "clean data" | "clean" => Some(Self::Clean),
            "auto-detect categories" | "detect categories" => Some(Self::DetectCategories),
            "merge similar rows" | "merge" => Some(Self::MergeSimilarRows),
            "fill missing values" | "fill missing" => Some(Self::FillMissing),
            _ => None,
        }
    }

    /// The display name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Clean => "Clean Data",
            Self::DetectCategories => "Auto-Detect Categories",
            Self::MergeSimilarRows => "Merge Similar Rows",
            Self::FillMissing => "Fill Missing Values",
        }
    }

    /// Apply the enhancement, returning a new table.
    pub fn apply(&self, table: &Table) -> Table {
        match self {
            Self::Clean => clean_data(table),
            Self::DetectCategories => detect_categories(table),
            Self::MergeSimilarRows => merge_similar_rows(table),
            Self::FillMissing => fill_missing_values(table),
        }
    }

    /// All enhancements, in catalog order.
    pub fn all() -> [Enhancement; 4] {
        [
            Self::Clean,
            Self::DetectCategories,
            Self::MergeSimilarRows,
            Self::FillMissing,
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
