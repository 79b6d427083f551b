//! Chart spec generation.
//!
//! Inspects a table's column types and produces a renderer-agnostic chart
//! description. No drawing happens here; the spec names the chart type,
//! axis fields, and carries the prepared data points.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::table::{Table, Value};
use crate::utils::{looks_like_date, parse_date, parse_decorated_number};

/// Column-name fragments that mark a column as temporal.
const DATE_COLUMN_HINTS: [&str; 3] = ["date", "day", "month"];

/// Maximum distinct values for a column to count as categorical.
const CATEGORICAL_DISTINCT_CAP: f64 = 10.0;

/// The kind of chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
}

/// A renderer-agnostic chart description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// The chart kind.
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Human-readable title.
    pub title: String,
    /// Field name of the x axis (or the pie slice name field).
    pub x_field: String,
    /// Field name of the y axis (or the pie slice value field).
    pub y_field: String,
    /// Prepared data points keyed by the axis fields.
    pub data: Vec<Map<String, JsonValue>>,
}

/// Generate a chart spec for a table.
///
/// Selection order:
/// 1. A date column and a numeric column: line chart over time.
/// 2. A categorical column and a numeric column: bar chart.
/// 3. A categorical column alone: pie chart of value counts.
/// 4. Otherwise: bar chart over the first two columns.
pub fn generate_chart(table: &Table) -> ChartSpec {
    let numeric = numeric_columns(table);
    let dates = date_columns(table);
    let categorical = categorical_columns(table, &dates, &numeric);

    if let (Some(x), Some(y)) = (dates.first(), numeric.first()) {
        return line_chart(table, x, y);
    }
    if let (Some(x), Some(y)) = (categorical.first(), numeric.first()) {
        return bar_chart(table, x, y);
    }
    if let Some(category) = categorical.first() {
        return pie_chart(table, category);
    }

    let x = table.columns.first().cloned().unwrap_or_default();
    let y = table.columns.get(1).cloned().unwrap_or_else(|| x.clone());
    bar_chart(table, &x, &y)
}

/// Columns where at least one cell parses as a decorated number.
fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|col| {
            table.rows.iter().any(|row| {
                row.get(*col)
                    .map(|v| parse_decorated_number(&v.render()).is_some())
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Columns whose name hints at time, or where some cell looks like a date.
fn date_columns(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|col| {
            let lowered = col.to_lowercase();
            let named_like_date = DATE_COLUMN_HINTS.iter().any(|h| lowered.contains(h));
            named_like_date
                || table.rows.iter().any(|row| {
                    row.get(*col)
                        .map(|v| looks_like_date(&v.render()))
                        .unwrap_or(false)
                })
        })
        .cloned()
        .collect()
}

/// Non-date, non-numeric columns with few distinct populated values.
fn categorical_columns(table: &Table, dates: &[String], numeric: &[String]) -> Vec<String> {
    let cap = (table.rows.len() as f64 * 0.5).min(CATEGORICAL_DISTINCT_CAP);
    table
        .columns
        .iter()
        .filter(|col| !dates.contains(col) && !numeric.contains(col))
        .filter(|col| {
            let distinct: std::collections::HashSet<String> = table
                .rows
                .iter()
                .filter_map(|row| row.get(*col))
                .filter(|v| !v.is_blank())
                .map(Value::render)
                .collect();
            distinct.len() as f64 <= cap
        })
        .cloned()
        .collect()
}

fn data_point(x_field: &str, x: JsonValue, y_field: &str, y: JsonValue) -> Map<String, JsonValue> {
    let mut point = Map::new();
    point.insert(x_field.to_string(), x);
    point.insert(y_field.to_string(), y);
    point
}

fn numeric_cell(table: &Table, row_index: usize, column: &str) -> f64 {
    table
        .cell(row_index, column)
        .and_then(|v| parse_decorated_number(&v.render()))
        .unwrap_or(0.0)
}

fn line_chart(table: &Table, x: &str, y: &str) -> ChartSpec {
    // Stable sort: rows with unparsable dates keep their relative order at
    // the end.
    let mut order: Vec<usize> = (0..table.rows.len()).collect();
    order.sort_by_key(|&i| {
        let date = parse_date(&table.cell_text(i, x));
        (date.is_none(), date)
    });

    let data = order
        .into_iter()
        .map(|i| {
            data_point(
                x,
                json!(table.cell_text(i, x)),
                y,
                json!(numeric_cell(table, i, y)),
            )
        })
        .collect();

    ChartSpec {
        chart_type: ChartType::Line,
        title: format!("{} Over Time", y),
        x_field: x.to_string(),
        y_field: y.to_string(),
        data,
    }
}

fn bar_chart(table: &Table, x: &str, y: &str) -> ChartSpec {
    let data = (0..table.rows.len())
        .map(|i| {
            data_point(
                x,
                json!(table.cell_text(i, x)),
                y,
                json!(numeric_cell(table, i, y)),
            )
        })
        .collect();

    ChartSpec {
        chart_type: ChartType::Bar,
        title: format!("{} by {}", y, x),
        x_field: x.to_string(),
        y_field: y.to_string(),
        data,
    }
}

fn pie_chart(table: &Table, category: &str) -> ChartSpec {
    // Count in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, u64> = std::collections::HashMap::new();
    for row in &table.rows {
        let Some(value) = row.get(category) else {
            continue;
        };
        if value.is_blank() {
            continue;
        }
        let rendered = value.render();
        if !counts.contains_key(&rendered) {
            order.push(rendered.clone());
        }
        *counts.entry(rendered).or_insert(0) += 1;
    }

    let data = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            data_point("name", json!(name), "value", json!(count))
        })
        .collect();

    ChartSpec {
        chart_type: ChartType::Pie,
        title: format!("Distribution of {}", category),
        x_field: "name".to_string(),
        y_field: "value".to_string(),
        data,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row_from_pairs;
    use pretty_assertions::assert_eq;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_date_plus_numeric_yields_sorted_line() {
        let table = Table::new(
            columns(&["Month", "Sales"]),
            vec![
                row_from_pairs([("Month", "2023-03-01"), ("Sales", "$30")]),
                row_from_pairs([("Month", "2023-01-01"), ("Sales", "$10")]),
                row_from_pairs([("Month", "2023-02-01"), ("Sales", "$20")]),
            ],
        );
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Line);
        assert_eq!(spec.title, "Sales Over Time");
        assert_eq!(spec.x_field, "Month");
        let sales: Vec<f64> = spec.data.iter().map(|p| p["Sales"].as_f64().unwrap()).collect();
        assert_eq!(sales, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_unparsable_dates_sort_last_in_order() {
        let table = Table::new(
            columns(&["Date", "N"]),
            vec![
                row_from_pairs([("Date", "someday"), ("N", "1")]),
                row_from_pairs([("Date", "2023-01-01"), ("N", "2")]),
                row_from_pairs([("Date", "another day"), ("N", "3")]),
            ],
        );
        let spec = generate_chart(&table);
        let dates: Vec<&str> = spec.data.iter().map(|p| p["Date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2023-01-01", "someday", "another day"]);
    }

    #[test]
    fn test_categorical_plus_numeric_yields_bar() {
        let table = Table::new(
            columns(&["Region", "Sales"]),
            vec![
                row_from_pairs([("Region", "West"), ("Sales", "10")]),
                row_from_pairs([("Region", "East"), ("Sales", "20")]),
                row_from_pairs([("Region", "West"), ("Sales", "30")]),
                row_from_pairs([("Region", "East"), ("Sales", "40")]),
            ],
        );
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Bar);
        assert_eq!(spec.title, "Sales by Region");
        // Rows keep their original order.
        let regions: Vec<&str> = spec.data.iter().map(|p| p["Region"].as_str().unwrap()).collect();
        assert_eq!(regions, vec!["West", "East", "West", "East"]);
    }

    #[test]
    fn test_unparsable_numeric_cells_become_zero() {
        let table = Table::new(
            columns(&["Region", "Sales"]),
            vec![
                row_from_pairs([("Region", "West"), ("Sales", "10")]),
                row_from_pairs([("Region", "West"), ("Sales", "n/a")]),
            ],
        );
        let spec = generate_chart(&table);
        assert_eq!(spec.data[1]["Sales"].as_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_categorical_only_yields_pie_counts() {
        let table = Table::new(
            columns(&["Category"]),
            vec![
                row_from_pairs([("Category", "toys")]),
                row_from_pairs([("Category", "games")]),
                row_from_pairs([("Category", "toys")]),
                row_from_pairs([("Category", "")]),
            ],
        );
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Pie);
        assert_eq!(spec.title, "Distribution of Category");
        assert_eq!(spec.x_field, "name");
        assert_eq!(spec.y_field, "value");
        assert_eq!(spec.data.len(), 2);
        assert_eq!(spec.data[0]["name"], "toys");
        assert_eq!(spec.data[0]["value"], 2);
        assert_eq!(spec.data[1]["name"], "games");
        assert_eq!(spec.data[1]["value"], 1);
    }

    #[test]
    fn test_fallback_bar_uses_first_two_columns() {
        // Every distinct free-text value: not categorical, not numeric,
        // not a date.
        let rows: Vec<_> = (0..30)
            .map(|i| {
                row_from_pairs([
                    ("Who", format!("person number {}", i).as_str()),
                    ("What", format!("did thing {}", i).as_str()),
                ])
            })
            .collect();
        let table = Table::new(columns(&["Who", "What"]), rows);
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Bar);
        assert_eq!(spec.x_field, "Who");
        assert_eq!(spec.y_field, "What");
    }

    #[test]
    fn test_single_column_table_reuses_column_for_both_axes() {
        let rows: Vec<_> = (0..30)
            .map(|i| row_from_pairs([("Note", format!("unique note {}", i).as_str())]))
            .collect();
        let table = Table::new(columns(&["Note"]), rows);
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Bar);
        assert_eq!(spec.x_field, "Note");
        assert_eq!(spec.y_field, "Note");
    }

    #[test]
    fn test_date_named_column_counts_as_temporal() {
        // No value looks like a date, but the name says "Day".
        let table = Table::new(
            columns(&["Day", "Visits"]),
            vec![
                row_from_pairs([("Day", "Monday"), ("Visits", "5")]),
                row_from_pairs([("Day", "Tuesday"), ("Visits", "8")]),
            ],
        );
        let spec = generate_chart(&table);
        assert_eq!(spec.chart_type, ChartType::Line);
    }
}
