//! Quote-aware delimited parsing and the inverse serializer.
//!
//! This is the primary parser used for AI-returned delimited text; it must
//! tolerate quoted fields containing the delimiter and a trailing blank
//! line. The round trip `parse(serialize(t))` is the identity for tables of
//! single-line text cells: header names are trimmed, data fields are kept
//! verbatim.

use crate::error::{Result, WranglingError};
use crate::table::{Row, Table, Value};

/// Parse delimited text into a table.
///
/// Line 1 becomes the column list; each subsequent line becomes a record
/// keyed positionally by column name. Records are filled left to right:
/// short lines leave trailing columns absent, extra fields are ignored.
/// Header names are trimmed; data fields keep their whitespace so the
/// serializer round-trips them unchanged.
///
/// # Errors
///
/// Returns [`WranglingError::Parse`] when there is no header line, or the
/// header has empty or duplicate column names.
pub fn parse_delimited(text: &str, delimiter: char) -> Result<Table> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let header = lines
        .first()
        .ok_or_else(|| WranglingError::Parse("no header line found".to_string()))?;

    let columns: Vec<String> = split_record(header, delimiter)
        .into_iter()
        .map(|f| f.trim().to_string())
        .collect();

    let table = Table::with_columns(columns);
    table
        .validate()
        .map_err(|e| WranglingError::Parse(format!("invalid header row: {}", e)))?;

    let mut rows: Vec<Row> = Vec::with_capacity(lines.len().saturating_sub(1));
    for line in &lines[1..] {
        let fields = split_record(line, delimiter);
        let mut row = Row::new();
        for (column, field) in table.columns.iter().zip(fields) {
            row.insert(column.clone(), Value::Text(field));
        }
        rows.push(row);
    }

    Ok(Table::new(table.columns, rows))
}

/// Serialize a table back to delimited text.
///
/// Missing cells render as empty fields; any value containing the
/// delimiter, a quote, or a newline is quoted, with embedded quotes
/// doubled.
pub fn serialize_delimited(table: &Table, delimiter: char) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(
        table
            .columns
            .iter()
            .map(|c| quote_field(c, delimiter))
            .collect::<Vec<_>>()
            .join(&delimiter.to_string()),
    );
    for row in &table.rows {
        let fields: Vec<String> = table
            .columns
            .iter()
            .map(|col| {
                let rendered = row.get(col).map(Value::render).unwrap_or_default();
                quote_field(&rendered, delimiter)
            })
            .collect();
        lines.push(fields.join(&delimiter.to_string()));
    }
    lines.join("\n")
}

/// Split one record into fields, honoring quotes.
///
/// A field wrapped in double quotes may contain the delimiter; a doubled
/// quote inside a quoted field is a literal quote.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}

fn quote_field(value: &str, delimiter: char) -> String {
    if value.contains(delimiter) || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
