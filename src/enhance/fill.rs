//! The Fill Missing Values enhancement.

use std::collections::HashMap;

use crate::table::{Table, Value};
use crate::utils::parse_decorated_number;

/// Fill blank cells column by column.
///
/// A column counts as numeric when any of its populated cells parses as a
/// number after stripping `$`, `,`, `%`. Numeric columns fill with the
/// mean of the populated values rendered to two decimals. Other columns
/// fill with the most common populated value (first seen wins a tie), or
/// `"Unknown"` when the column has no populated cells at all. Fill values
/// are computed from the original table, so filled cells never feed back
/// into the statistics.
pub fn fill_missing_values(table: &Table) -> Table {
    let fills: HashMap<&String, String> = table
        .columns
        .iter()
        .map(|col| (col, fill_value(table, col)))
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut updated = row.clone();
            for col in &table.columns {
                let blank = updated.get(col).map(Value::is_blank).unwrap_or(true);
                if blank {
                    updated.insert(col.clone(), Value::Text(fills[col].clone()));
                }
            }
            updated
        })
        .collect();

    Table::new(table.columns.clone(), rows)
}

fn fill_value(table: &Table, column: &str) -> String {
    let populated: Vec<String> = table
        .rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|v| !v.is_blank())
        .map(Value::render)
        .collect();

    let numeric: Vec<f64> = populated
        .iter()
        .filter_map(|v| parse_decorated_number(v))
        .collect();

    if !numeric.is_empty() {
        let mean = numeric.iter().sum::<f64>() / numeric.len() as f64;
        return format!("{:.2}", mean);
    }
    // A column with populated cells but no parseable numbers is
    // categorical; one with no populated cells at all still counts as
    // non-numeric and falls through to "Unknown".
    mode(&populated).unwrap_or_else(|| "Unknown".to_string())
}

/// Most frequent value; on a tie the value seen first wins.
fn mode(values: &[String]) -> Option<String> {
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for value in values {
        let count = counts[value];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value.clone())
}

// ============================================================================
// Tests
// ============================================================================
