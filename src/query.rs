//! Deterministic query mutations.
//!
//! A natural-language query always gets an AI answer, but three request
//! families additionally mutate the table without any AI involvement:
//! sorting, deduplication, and filtering. The families are checked in that
//! order and at most one mutation applies per query.

use std::cmp::Ordering;

use crate::table::{Table, Value};

/// Words skipped when scanning for a filter value after the column name.
const FILTER_SKIP_WORDS: [&str; 9] = [
    "with", "by", "where", "is", "equals", "equal", "to", "than", "containing",
];

/// Decoration characters ignored when comparing cells numerically for a
/// sort. Percent signs are deliberately not stripped here.
const SORT_DECORATIONS: [char; 2] = ['$', ','];

/// Try to derive a table mutation from a query.
///
/// Returns `None` when no family matches or the matched family cannot
/// resolve a target (no column named in a sort, no usable filter value).
pub fn apply_query_mutation(table: &Table, query: &str) -> Option<Table> {
    let lowered = query.to_lowercase();

    if lowered.contains("sort") || lowered.contains("order") {
        return sort_rows(table, &lowered);
    }
    if lowered.contains("remove duplicate") || lowered.contains("deduplicate") {
        return Some(deduplicate_rows(table));
    }
    if lowered.contains("filter") || lowered.contains("show only") {
        return filter_rows(table, query, &lowered);
    }
    None
}

/// First column whose name appears in the lowercased query.
fn matched_column<'a>(table: &'a Table, lowered_query: &str) -> Option<&'a String> {
    table
        .columns
        .iter()
        .find(|col| lowered_query.contains(&col.to_lowercase()))
}

fn sort_rows(table: &Table, lowered_query: &str) -> Option<Table> {
    let column = matched_column(table, lowered_query)?;
    let descending = lowered_query.contains("highest")
        || lowered_query.contains("descending")
        || lowered_query.contains("desc");

    let mut rows = table.rows.clone();
    rows.sort_by(|a, b| {
        let a_val = a.get(column).map(Value::render).unwrap_or_default();
        let b_val = b.get(column).map(Value::render).unwrap_or_default();
        let ordering = compare_cells(&a_val, &b_val);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    Some(Table::new(table.columns.clone(), rows))
}

/// Numeric comparison when both cells parse after stripping `$` and `,`,
/// string comparison otherwise. Numeric cells order before non-numeric
/// ones, keeping the comparator a total order as `sort_by` requires.
fn compare_cells(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| {
        let stripped: String = s.chars().filter(|c| !SORT_DECORATIONS.contains(c)).collect();
        stripped.trim().parse::<f64>().ok()
    };
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn deduplicate_rows(table: &Table) -> Table {
    let mut seen = std::collections::HashSet::new();
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            let values: Vec<String> = table
                .columns
                .iter()
                .map(|col| row.get(col).map(Value::render).unwrap_or_default())
                .collect();
            let key = serde_json::to_string(&values).unwrap_or_default();
            seen.insert(key)
        })
        .cloned()
        .collect();
    Table::new(table.columns.clone(), rows)
}

fn filter_rows(table: &Table, query: &str, lowered_query: &str) -> Option<Table> {
    let column = matched_column(table, lowered_query)?;
    let column_lowered = column.to_lowercase();

    let words: Vec<&str> = query.split(' ').collect();
    let column_index = words
        .iter()
        .position(|word| word.to_lowercase().contains(&column_lowered))?;

    let filter_value = words[column_index + 1..]
        .iter()
        .find(|word| !FILTER_SKIP_WORDS.contains(&word.to_lowercase().as_str()))
        .map(|word| word.replace(['\'', '"', ',', '.'], ""))?;
    if filter_value.is_empty() {
        return None;
    }

    let needle = filter_value.to_lowercase();
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            let cell = row.get(column).map(Value::render).unwrap_or_default();
            cell.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Some(Table::new(table.columns.clone(), rows))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row_from_pairs;
    use pretty_assertions::assert_eq;

    fn revenue_table() -> Table {
        Table::new(
            vec!["Product".to_string(), "Revenue".to_string()],
            vec![
                row_from_pairs([("Product", "A"), ("Revenue", "$50")]),
                row_from_pairs([("Product", "B"), ("Revenue", "$20")]),
                row_from_pairs([("Product", "C"), ("Revenue", "$80")]),
            ],
        )
    }

    #[test]
    fn test_sort_descending_on_highest() {
        let result = apply_query_mutation(&revenue_table(), "sort by revenue highest").unwrap();
        let revenues: Vec<String> = (0..3).map(|i| result.cell_text(i, "Revenue")).collect();
        assert_eq!(revenues, vec!["$80", "$50", "$20"]);
    }

    #[test]
    fn test_sort_ascending_by_default() {
        let result = apply_query_mutation(&revenue_table(), "order by revenue").unwrap();
        let revenues: Vec<String> = (0..3).map(|i| result.cell_text(i, "Revenue")).collect();
        assert_eq!(revenues, vec!["$20", "$50", "$80"]);
    }

    #[test]
    fn test_sort_strings_lexically() {
        let result = apply_query_mutation(&revenue_table(), "sort by product descending").unwrap();
        let products: Vec<String> = (0..3).map(|i| result.cell_text(i, "Product")).collect();
        assert_eq!(products, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_mixed_column_groups_numbers_first() {
        // Interleave numeric and text cells; the comparator must stay a
        // total order so the sort is well-defined.
        let rows: Vec<_> = (0..30)
            .flat_map(|i| {
                vec![
                    row_from_pairs([("Amount", format!("{}", 30 - i).as_str())]),
                    row_from_pairs([("Amount", format!("pending-{}", i).as_str())]),
                ]
            })
            .collect();
        let table = Table::new(vec!["Amount".to_string()], rows);

        let result = apply_query_mutation(&table, "sort by amount").unwrap();
        let values: Vec<String> = (0..60).map(|i| result.cell_text(i, "Amount")).collect();
        // All numeric cells come first, ascending.
        assert_eq!(values[0], "1");
        assert_eq!(values[29], "30");
        assert!(values[30..].iter().all(|v| v.starts_with("pending-")));
    }

    #[test]
    fn test_sort_without_column_match_does_nothing() {
        assert!(apply_query_mutation(&revenue_table(), "sort by nonsense").is_none());
    }

    #[test]
    fn test_deduplicate() {
        let table = Table::new(
            vec!["A".to_string(), "B".to_string()],
            vec![
                row_from_pairs([("A", "1"), ("B", "x")]),
                row_from_pairs([("A", "1"), ("B", "x")]),
                row_from_pairs([("A", "1"), ("B", "y")]),
            ],
        );
        let result = apply_query_mutation(&table, "remove duplicates please").unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.cell_text(1, "B"), "y");
    }

    #[test]
    fn test_filter_by_column_value() {
        let table = Table::new(
            vec!["Region".to_string(), "Sales".to_string()],
            vec![
                row_from_pairs([("Region", "West"), ("Sales", "10")]),
                row_from_pairs([("Region", "East"), ("Sales", "20")]),
                row_from_pairs([("Region", "Northwest"), ("Sales", "30")]),
            ],
        );
        let result = apply_query_mutation(&table, "filter region to West").unwrap();
        // Substring match: "Northwest" contains "west" case-insensitively.
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.cell_text(0, "Region"), "West");
        assert_eq!(result.cell_text(1, "Region"), "Northwest");
    }

    #[test]
    fn test_filter_skips_prepositions_and_strips_punctuation() {
        let table = Table::new(
            vec!["Region".to_string()],
            vec![
                row_from_pairs([("Region", "West")]),
                row_from_pairs([("Region", "East")]),
            ],
        );
        let result =
            apply_query_mutation(&table, "show only region where is equal to 'West'.").unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.cell_text(0, "Region"), "West");
    }

    #[test]
    fn test_filter_with_no_value_does_nothing() {
        let table = Table::new(
            vec!["Region".to_string()],
            vec![row_from_pairs([("Region", "West")])],
        );
        assert!(apply_query_mutation(&table, "filter by region").is_none());
    }

    #[test]
    fn test_sort_family_wins_over_filter() {
        // "sort" appears, so the filter keyword later in the query is
        // never considered.
        let result =
            apply_query_mutation(&revenue_table(), "sort by revenue and filter product A").unwrap();
        assert_eq!(result.rows.len(), 3);
    }

    #[test]
    fn test_plain_question_mutates_nothing() {
        assert!(apply_query_mutation(&revenue_table(), "what is the total revenue?").is_none());
    }
}
