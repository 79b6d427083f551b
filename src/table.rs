//! The canonical table model shared by every pipeline stage.
//!
//! A [`Table`] is an ordered list of column names plus an ordered list of
//! rows. Rows map column names to tagged scalar [`Value`]s and are not
//! required to populate every column; downstream consumers treat a missing
//! key as an empty string. Column order and row order are significant and
//! must survive every transformation.
//!
//! Tables are never mutated in place: every transformation takes a table by
//! reference and returns a new one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, WranglingError};

/// A single cell value.
///
/// Values are not homogeneously typed across a column; type is inferred
/// heuristically per use, never enforced as schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A text cell. Parsed delimited input always produces text cells, which
    /// keep their exact decorated form (e.g. `"$1,200.00"`).
    Text(String),
    /// A numeric cell, as produced by JSON ingestion or chart coercion.
    Number(f64),
    /// An explicit null.
    Null,
}

impl Value {
    /// Render the value the way exports and prompts see it.
    ///
    /// `Null` renders as an empty string; numbers render without a trailing
    /// `.0` for whole values.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => format!("{}", n),
            Value::Null => String::new(),
        }
    }

    /// Whether this value counts as empty/missing for the heuristics
    /// (null, or text that is empty after trimming).
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Number(_) => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// A row: a mapping from column name to cell value.
pub type Row = HashMap<String, Value>;

/// The canonical table: ordered columns plus ordered rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Ordered, unique column names.
    pub columns: Vec<String>,
    /// Ordered records; each maps a subset of `columns` to values.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Create an empty table with the given columns.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The value at (row, column), if the row populates that column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// The rendered text at (row, column); missing cells render as "".
    pub fn cell_text(&self, row: usize, column: &str) -> String {
        self.cell(row, column).map(Value::render).unwrap_or_default()
    }

    /// Check the basic shape invariants: at least one column, all column
    /// names non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(WranglingError::Validation(
                "table has no columns".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for col in &self.columns {
            if col.is_empty() {
                return Err(WranglingError::Validation(
                    "table has an empty column name".to_string(),
                ));
            }
            if !seen.insert(col.as_str()) {
                return Err(WranglingError::Validation(format!(
                    "duplicate column name '{}'",
                    col
                )));
            }
        }
        Ok(())
    }

    /// Lossless JSON export as an array of records.
    ///
    /// Column order within each record and row order are preserved exactly;
    /// missing cells export as empty strings.
    pub fn to_json_records(&self) -> serde_json::Value {
        let records: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut record = serde_json::Map::new();
                for col in &self.columns {
                    let value = match row.get(col) {
                        Some(Value::Text(s)) => serde_json::Value::String(s.clone()),
                        Some(Value::Number(n)) => serde_json::json!(n),
                        Some(Value::Null) | None => serde_json::Value::String(String::new()),
                    };
                    record.insert(col.clone(), value);
                }
                serde_json::Value::Object(record)
            })
            .collect();
        serde_json::Value::Array(records)
    }
}

/// Build a row from (column, value) pairs. Test and fixture helper.
pub fn row_from_pairs<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
