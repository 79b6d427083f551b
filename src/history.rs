//! Version history and the workspace that wraps it.
//!
//! Every successful transformation or enhancement commits a full table
//! snapshot. The history is append-only; selecting an older version only
//! moves the cursor, so redo information is never lost until a new commit
//! is made on top of it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WranglingError};
use crate::table::Table;
use crate::types::Transformation;

/// An append-only list of table snapshots with a cursor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionHistory {
    versions: Vec<Table>,
    cursor: usize,
}

impl VersionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no version has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Index of the currently selected version.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Append a snapshot and move the cursor to it. Returns the new
    /// version's index.
    pub fn push(&mut self, table: Table) -> usize {
        self.versions.push(table);
        self.cursor = self.versions.len() - 1;
        self.cursor
    }

    /// Move the cursor to an existing version.
    ///
    /// # Errors
    ///
    /// Returns [`WranglingError::VersionIndex`] when the index is out of
    /// range. The cursor is left unchanged in that case.
    pub fn select(&mut self, index: usize) -> Result<&Table> {
        if index >= self.versions.len() {
            return Err(WranglingError::VersionIndex {
                index,
                len: self.versions.len(),
            });
        }
        self.cursor = index;
        Ok(&self.versions[index])
    }

    /// The table the cursor points at, if any version exists.
    pub fn current(&self) -> Option<&Table> {
        self.versions.get(self.cursor)
    }

    /// A stored version without moving the cursor.
    pub fn get(&self, index: usize) -> Option<&Table> {
        self.versions.get(index)
    }

    /// Structural difference between two stored versions.
    ///
    /// # Errors
    ///
    /// Returns [`WranglingError::VersionIndex`] when either index is out
    /// of range.
    pub fn diff(&self, from: usize, to: usize) -> Result<VersionDiff> {
        let len = self.versions.len();
        let get = |index: usize| {
            self.versions
                .get(index)
                .ok_or(WranglingError::VersionIndex { index, len })
        };
        Ok(VersionDiff::between(get(from)?, get(to)?))
    }
}

/// Structural difference between two table versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDiff {
    /// Column names present in the newer version only.
    pub columns_added: Vec<String>,
    /// Column names present in the older version only.
    pub columns_removed: Vec<String>,
    /// Row count change, negative when rows were dropped.
    pub row_count_delta: i64,
}

impl VersionDiff {
    /// Compare two tables by column name and row count.
    pub fn between(from: &Table, to: &Table) -> Self {
        let columns_added = to
            .columns
            .iter()
            .filter(|c| !from.columns.contains(c))
            .cloned()
            .collect();
        let columns_removed = from
            .columns
            .iter()
            .filter(|c| !to.columns.contains(c))
            .cloned()
            .collect();
        Self {
            columns_added,
            columns_removed,
            row_count_delta: to.rows.len() as i64 - from.rows.len() as i64,
        }
    }
}

/// A table, its version history, and the audit trail of what was done.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    history: VersionHistory,
    transformations: Vec<Transformation>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a workspace from an initial table.
    pub fn with_table(table: Table, description: impl Into<String>) -> Self {
        let mut workspace = Self::new();
        workspace.commit(table, "transform", description);
        workspace
    }

    /// Commit a new snapshot with an audit record. Returns the version
    /// index.
    pub fn commit(
        &mut self,
        table: Table,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> usize {
        self.transformations.push(Transformation::new(kind, description));
        self.history.push(table)
    }

    /// The current table, if any commit has been made.
    pub fn current(&self) -> Option<&Table> {
        self.history.current()
    }

    /// The underlying version history.
    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    /// Mutable access to the version history, for cursor moves.
    pub fn history_mut(&mut self) -> &mut VersionHistory {
        &mut self.history
    }

    /// The audit trail, oldest first.
    pub fn transformations(&self) -> &[Transformation] {
        &self.transformations
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

    fn table_with_rows(n: usize) -> Table {
        let rows = (0..n)
            .map(|i| row_from_pairs([("A", i.to_string().as_str())]))
            .collect();
        Table::new(vec!["A".to_string()], rows)
    }

    #[test]
    fn test_push_moves_cursor_and_returns_index() {
        let mut history = VersionHistory::new();
        assert_eq!(history.push(table_with_rows(1)), 0);
        assert_eq!(history.push(table_with_rows(2)), 1);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_select_moves_cursor_without_truncating() {
        let mut history = VersionHistory::new();
        history.push(table_with_rows(1));
        history.push(table_with_rows(2));
        history.push(table_with_rows(3));

        let selected = history.select(0).unwrap();
        assert_eq!(selected.rows.len(), 1);
        assert_eq!(history.cursor(), 0);
        // All versions survive the cursor move.
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(2).unwrap().rows.len(), 3);
    }

    #[test]
    fn test_select_out_of_range_fails_and_keeps_cursor() {
        let mut history = VersionHistory::new();
        history.push(table_with_rows(1));

        let err = history.select(5).unwrap_err();
        assert_eq!(err.error_code(), "INDEX_ERROR");
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_push_after_select_appends_at_end() {
        let mut history = VersionHistory::new();
        history.push(table_with_rows(1));
        history.push(table_with_rows(2));
        history.select(0).unwrap();

        assert_eq!(history.push(table_with_rows(9)), 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_diff_reports_columns_and_row_delta() {
        let from = Table::new(
            vec!["A".to_string(), "B".to_string()],
            vec![row_from_pairs([("A", "1"), ("B", "2")])],
        );
        let to = Table::new(
            vec!["A".to_string(), "C".to_string()],
            vec![
                row_from_pairs([("A", "1"), ("C", "2")]),
                row_from_pairs([("A", "3"), ("C", "4")]),
            ],
        );

        let diff = VersionDiff::between(&from, &to);
        assert_eq!(diff.columns_added, vec!["C"]);
        assert_eq!(diff.columns_removed, vec!["B"]);
        assert_eq!(diff.row_count_delta, 1);
    }

    #[test]
    fn test_diff_is_directional() {
        let mut history = VersionHistory::new();
        history.push(table_with_rows(3));
        history.push(table_with_rows(1));

        assert_eq!(history.diff(0, 1).unwrap().row_count_delta, -2);
        assert_eq!(history.diff(1, 0).unwrap().row_count_delta, 2);
        assert!(history.diff(0, 7).is_err());
    }

    #[test]
    fn test_workspace_commit_records_audit_trail() {
        let mut workspace = Workspace::with_table(table_with_rows(2), "Pasted CSV");
        workspace.commit(table_with_rows(1), "clean", "Removed 1 empty row");

        assert_eq!(workspace.history().len(), 2);
        assert_eq!(workspace.transformations().len(), 2);
        assert_eq!(workspace.transformations()[1].kind, "clean");
        assert_eq!(workspace.current().unwrap().rows.len(), 1);
    }
}
