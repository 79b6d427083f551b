//! Deterministic last-resort transformation.
//!
//! When no provider is configured, or structuring fails, raw text still has
//! to become a table. This path never fails: worst case the input turns
//! into a single "Data" column with one row per line.

use crate::table::{Row, Table, Value};

/// Delimiters tried on the first line, best column count wins.
const CANDIDATE_DELIMITERS: [char; 4] = [',', '\t', '|', ';'];

/// Column name used when the input has no detectable structure.
const DATA_COLUMN: &str = "Data";

/// Transform raw text into a table without any AI involvement.
///
/// Strategy, in order:
/// 1. Split on whichever candidate delimiter yields the most columns on the
///    first line; data rows whose field count differs from the header are
///    dropped.
/// 2. If no delimiter yields more than one column but the text contains
///    `:`, treat each `key: value` line as a one-cell row; the distinct
///    keys become the columns.
/// 3. Otherwise, one "Data" column with one row per non-blank line.
///
/// Empty input yields an empty "Data" table rather than an error.
pub fn fallback_transform(text: &str) -> Table {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.is_empty() {
        return Table::with_columns(vec![DATA_COLUMN.to_string()]);
    }

    let (delimiter, max_columns) = best_delimiter(lines[0]);
    if max_columns > 1 {
        return split_on_delimiter(&lines, delimiter);
    }

    if text.contains(':') {
        return key_value_table(&lines);
    }

    let rows = lines
        .iter()
        .map(|line| {
            let mut row = Row::new();
            row.insert(DATA_COLUMN.to_string(), Value::Text(line.to_string()));
            row
        })
        .collect();
    Table::new(vec![DATA_COLUMN.to_string()], rows)
}

fn best_delimiter(first_line: &str) -> (char, usize) {
    let mut best = (CANDIDATE_DELIMITERS[0], 0);
    for delimiter in CANDIDATE_DELIMITERS {
        let columns = first_line.split(delimiter).count();
        if columns > best.1 {
            best = (delimiter, columns);
        }
    }
    best
}

fn split_on_delimiter(lines: &[&str], delimiter: char) -> Table {
    let columns: Vec<String> = lines[0]
        .split(delimiter)
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(delimiter).collect();
        // Ragged lines are noise here, not data.
        if fields.len() != columns.len() {
            continue;
        }
        let mut row = Row::new();
        for (column, field) in columns.iter().zip(fields) {
            row.insert(column.clone(), Value::Text(field.trim().to_string()));
        }
        rows.push(row);
    }

    Table::new(columns, rows)
}

fn key_value_table(lines: &[&str]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim().to_string();
        if !columns.contains(&key) {
            columns.push(key.clone());
        }
        let mut row = Row::new();
        row.insert(key, Value::Text(value));
        rows.push(row);
    }

    Table::new(columns, rows)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comma_delimited() {
        let table = fallback_transform("Name,Age\nAlice,30\nBob,28");
        assert_eq!(table.columns, vec!["Name", "Age"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell_text(1, "Name"), "Bob");
    }

    #[test]
    fn test_best_delimiter_wins() {
        // Pipes yield 3 columns, commas only 2.
        let table = fallback_transform("a,b|c|d\n1,2|3|4");
        assert_eq!(table.columns, vec!["a,b", "c", "d"]);
    }

    #[test]
    fn test_ragged_rows_are_dropped() {
        let table = fallback_transform("A,B\n1,2\nonly-one-field\n3,4");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell_text(1, "A"), "3");
    }

    #[test]
    fn test_key_value_lines() {
        let table = fallback_transform("Name: Alice\nAge: 30\nName: Bob");
        assert_eq!(table.columns, vec!["Name", "Age"]);
        assert_eq!(table.rows.len(), 3);
        // Each row carries only its own key.
        assert_eq!(table.cell_text(0, "Name"), "Alice");
        assert!(table.cell(0, "Age").is_none());
        assert_eq!(table.cell_text(1, "Age"), "30");
    }

    #[test]
    fn test_key_value_keeps_colons_in_value() {
        let table = fallback_transform("URL: https://example.com:8080");
        assert_eq!(table.cell_text(0, "URL"), "https://example.com:8080");
    }

    #[test]
    fn test_plain_lines_become_data_column() {
        let table = fallback_transform("first\nsecond\nthird");
        assert_eq!(table.columns, vec!["Data"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.cell_text(2, "Data"), "third");
    }

    #[test]
    fn test_empty_input_yields_empty_data_table() {
        let table = fallback_transform("");
        assert_eq!(table.columns, vec!["Data"]);
        assert!(table.rows.is_empty());

        let table = fallback_transform("  \n \n");
        assert_eq!(table.columns, vec!["Data"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        for text in ["::::", ",", "\t\t\n\t", "a;b;c", "| | |"] {
            let _ = fallback_transform(text);
        }
    }
}
