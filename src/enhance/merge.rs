//! The Merge Similar Rows enhancement.

use std::collections::HashMap;

use crate::table::{Table, Value};
use crate::utils::{is_plain_decimal, parse_decorated_number};

/// Column-name fragments that mark a column as a quantity to aggregate
/// rather than part of the grouping key.
const AGGREGATE_COLUMN_HINTS: [&str; 3] = ["quantity", "price", "revenue"];

/// Collapse rows that agree on every key column, summing mergeable numeric
/// cells in the remaining columns.
///
/// Key columns are all columns whose name does not hint at a quantity. If
/// every column is a quantity column there is no usable key and the table
/// is returned unchanged. Merged rows keep the position of their first
/// occurrence, and a summed cell keeps the `$`/`%` decoration of the value
/// first seen in the group.
pub fn merge_similar_rows(table: &Table) -> Table {
    let key_columns: Vec<&String> = table
        .columns
        .iter()
        .filter(|col| {
            let lowered = col.to_lowercase();
            !AGGREGATE_COLUMN_HINTS.iter().any(|h| lowered.contains(h))
        })
        .collect();

    if key_columns.is_empty() {
        return table.clone();
    }

    let mut merged: Vec<crate::table::Row> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for row in &table.rows {
        let key = key_columns
            .iter()
            .map(|col| row.get(*col).map(Value::render).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("|");

        match index_by_key.get(&key) {
            None => {
                index_by_key.insert(key, merged.len());
                merged.push(row.clone());
            }
            Some(&idx) => {
                let target = &mut merged[idx];
                for col in &table.columns {
                    if key_columns.contains(&col) {
                        continue;
                    }
                    let incoming = match row.get(col) {
                        Some(Value::Text(text)) if is_plain_decimal(text) => text.clone(),
                        _ => continue,
                    };
                    let incoming_num = parse_decorated_number(&incoming).unwrap_or(0.0);
                    let existing = target.get(col).map(Value::render).unwrap_or_default();
                    let existing_num = parse_decorated_number(&existing).unwrap_or(0.0);

                    let sum = existing_num + incoming_num;
                    let decorated = apply_decoration(sum, &existing, &incoming);
                    target.insert(col.clone(), Value::Text(decorated));
                }
            }
        }
    }

    Table::new(table.columns.clone(), merged)
}

/// Render a sum with the `$`/`%` decoration of the first-seen value; if the
/// first-seen cell was empty, the incoming value decides.
fn apply_decoration(sum: f64, first_seen: &str, incoming: &str) -> String {
    let template = if first_seen.trim().is_empty() {
        incoming
    } else {
        first_seen
    };
    let rendered = format!("{}", sum);
    if template.contains('%') {
        format!("{}%", rendered)
    } else if template.contains('$') {
        format!("${}", rendered)
    } else {
        rendered
    }
}

// ============================================================================
// Tests
// ============================================================================
