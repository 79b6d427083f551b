//! Shared request/response types for the pipeline surface.

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Raw input handed to the transform entry point.
///
/// Serializes adjacently tagged, e.g.
/// `{"kind": "text", "payload": "Name,Age\n..."}`; internal tagging cannot
/// carry the plain-string text variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum TransformInput {
    /// Free-typed text (the only input kind subject to keyword routing).
    Text(String),
    /// File-derived text (plain text, PDF-extracted text, spreadsheet text).
    File {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        file_name: Option<String>,
    },
    /// Raw image bytes to be structured by a vision-capable provider.
    Image { data: Vec<u8>, mime_type: String },
}

impl TransformInput {
    /// Whether the input carries no usable payload.
    pub fn is_empty(&self) -> bool {
        match self {
            TransformInput::Text(text) => text.trim().is_empty(),
            TransformInput::File { content, .. } => content.trim().is_empty(),
            TransformInput::Image { data, .. } => data.is_empty(),
        }
    }
}

/// Audit record appended whenever an enhancement or AI edit succeeds.
///
/// Purely observational; later transformations never consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    /// Kind of change ("clean", "merge-similar-rows", "ai-edit", ...).
    pub kind: String,
    /// Human-readable description of what happened.
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Transformation {
    /// Create a record stamped with the current time.
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Result of a freeform (AI-driven) enhancement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceOutcome {
    /// The updated table.
    pub table: Table,
    /// Natural-language explanation of what changed, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Result of a natural-language query against a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// The AI answer to the question. Never mutates data.
    pub answer: String,
    /// A mutated table, present only when the deterministic keyword path
    /// recognized a sort/dedupe/filter request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_table: Option<Table>,
}

/// Named formula kinds expanded into table-edit instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    Sum,
    Average,
    Max,
    Min,
    Count,
    Percentage,
    Growth,
}

// ============================================================================
// Tests
// ============================================================================
