//! The Auto-Detect Categories enhancement.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::{Table, Value};
use crate::utils::looks_like_date;

/// Name of the appended summary column.
const DATA_TYPE_COLUMN: &str = "DataType";

/// Known category vocabulary, matched case-insensitively.
const CATEGORY_VOCABULARY: [&str; 3] = ["electronics", "accessories", "wearables"];

static CURRENCY_PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$?\d+(\.\d{2})?$").unwrap());
static CURRENCY_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\d{1,3}(,\d{3})*(\.\d{2})?$").unwrap());
static PERCENTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?%$").unwrap());
static PRODUCT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,3}-\d{3,6}$").unwrap());

/// Append a `DataType` column summarizing the detected type of each text
/// cell in the row, e.g. `"Price: Currency, SKU: ProductID"`. Rows where
/// nothing is detected get `"No special types detected"`.
pub fn detect_categories(table: &Table) -> Table {
    let mut columns = table.columns.clone();
    columns.push(DATA_TYPE_COLUMN.to_string());

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut detections = Vec::new();
            for column in &table.columns {
                if let Some(Value::Text(text)) = row.get(column) {
                    if let Some(label) = classify_cell(text) {
                        detections.push(format!("{}: {}", column, label));
                    }
                }
            }
            let summary = if detections.is_empty() {
                "No special types detected".to_string()
            } else {
                detections.join(", ")
            };
            let mut updated = row.clone();
            updated.insert(DATA_TYPE_COLUMN.to_string(), Value::Text(summary));
            updated
        })
        .collect();

    Table::new(columns, rows)
}

/// Classify a single cell. Rules run in order; the first match wins, so a
/// bare number reads as Currency before anything else gets a chance.
fn classify_cell(text: &str) -> Option<&'static str> {
    if looks_like_date(text) {
        Some("Date")
    } else if CURRENCY_PLAIN.is_match(text) || CURRENCY_GROUPED.is_match(text) {
        Some("Currency")
    } else if PERCENTAGE.is_match(text) {
        Some("Percentage")
    } else if CATEGORY_VOCABULARY.contains(&text.to_lowercase().as_str()) {
        Some("Category")
    } else if PRODUCT_ID.is_match(text) {
        Some("ProductID")
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
