//! The Clean Data enhancement.

use crate::table::{Table, Value};
use crate::utils::{normalize_date, strip_decorations};

/// Column-name fragments that mark a column as monetary.
const MONEY_COLUMN_HINTS: [&str; 3] = ["price", "revenue", "cost"];

/// Clean a table: drop rows where every cell is blank, trim text cells,
/// normalize dates in date-named columns to `YYYY-MM-DD`, and re-render
/// `$`-decorated values in money-named columns as `$X.XX`.
///
/// Applying the enhancement twice yields the same table as applying it
/// once.
pub fn clean_data(table: &Table) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|row| row.values().any(|v| !v.is_blank()))
        .map(|row| {
            let mut cleaned = row.clone();
            for column in &table.columns {
                let Some(Value::Text(text)) = cleaned.get(column) else {
                    continue;
                };
                let mut value = text.trim().to_string();

                let lowered = column.to_lowercase();
                if lowered.contains("date") {
                    if let Some(normalized) = normalize_date(&value) {
                        value = normalized;
                    }
                }
                if MONEY_COLUMN_HINTS.iter().any(|h| lowered.contains(h)) && value.contains('$') {
                    if let Ok(amount) = strip_decorations(&value).parse::<f64>() {
                        value = format!("${:.2}", amount);
                    }
                }

                cleaned.insert(column.clone(), Value::Text(value));
            }
            cleaned
        })
        .collect();

    Table::new(table.columns.clone(), rows)
}

// ============================================================================
// Tests
// ============================================================================
