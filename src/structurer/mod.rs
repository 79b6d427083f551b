//! AI-backed table structuring, enhancement, and question answering.
//!
//! The [`Structurer`] owns a provider and turns raw text or images into
//! [`Table`]s, applies freeform edits, and answers questions. Every call
//! follows the same shape: build a prompt, send it, strip stray code
//! fences, parse the CSV reply.

pub mod prompts;

use std::sync::Arc;

use tracing::debug;

use crate::ai::{AIProvider, ImagePart};
use crate::error::{Result, WranglingError};
use crate::parser::{parse_delimited, serialize_delimited, DEFAULT_DELIMITER};
use crate::table::Table;
use crate::types::{EnhanceOutcome, FormulaKind};

/// Drives all AI-backed operations against a single provider.
pub struct Structurer {
    provider: Arc<dyn AIProvider>,
}

impl Structurer {
    /// Create a structurer over the given provider.
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// The provider name, for logging.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Convert free text into a table with auto-detected columns.
    pub fn structure_generic(&self, text: &str) -> Result<Table> {
        self.complete_to_table(&prompts::generic_transform(text), None)
    }

    /// Convert free text into a table of a known domain shape, optionally
    /// constrained to a fixed column list.
    pub fn structure_typed(
        &self,
        text: &str,
        table_type: Option<&str>,
        columns: &[String],
    ) -> Result<Table> {
        self.complete_to_table(&prompts::typed_table(text, table_type, columns), None)
    }

    /// Extract entities of a known kind ("people", "companies", ...) into a
    /// table.
    pub fn extract_entities(&self, text: &str, entity_type: &str) -> Result<Table> {
        self.complete_to_table(&prompts::entity_extraction(text, entity_type), None)
    }

    /// Structure document-derived text (plain text, PDF text, spreadsheet
    /// text).
    pub fn structure_file(&self, content: &str) -> Result<Table> {
        self.complete_to_table(&prompts::file_extraction(content), None)
    }

    /// Extract a table from raw image bytes.
    pub fn structure_image(&self, data: &[u8], mime_type: &str) -> Result<Table> {
        let image = ImagePart {
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
        };
        self.complete_to_table(&prompts::image_extraction(), Some(&image))
    }

    /// Repair messy delimited text into a clean table.
    pub fn cleanup_csv(&self, csv: &str) -> Result<Table> {
        self.complete_to_table(&prompts::csv_cleanup(csv), None)
    }

    /// Apply a natural-language edit to a table.
    ///
    /// When `want_explanation` is set, a second call asks the provider to
    /// summarize what changed; a failure of that second call is not fatal
    /// and simply yields no explanation.
    pub fn enhance(
        &self,
        table: &Table,
        instructions: &str,
        want_explanation: bool,
    ) -> Result<EnhanceOutcome> {
        let csv = serialize_delimited(table, DEFAULT_DELIMITER);
        let updated = self.complete_to_table(&prompts::enhance(&csv, instructions), None)?;

        let explanation = if want_explanation {
            self.ask(&updated, &prompts::explain_changes(instructions)).ok()
        } else {
            None
        };

        Ok(EnhanceOutcome {
            table: updated,
            explanation,
        })
    }

    /// Run the comprehensive auto-clean instruction over a table, with a
    /// bullet-point summary of what was fixed.
    pub fn auto_clean(&self, table: &Table) -> Result<EnhanceOutcome> {
        let csv = serialize_delimited(table, DEFAULT_DELIMITER);
        let updated =
            self.complete_to_table(&prompts::enhance(&csv, &prompts::auto_clean_instruction()), None)?;

        let explanation = self.ask(&updated, &prompts::clean_summary()).ok();

        Ok(EnhanceOutcome {
            table: updated,
            explanation,
        })
    }

    /// Apply a named formula over a column, returning the edited table and
    /// an explanation of the result.
    pub fn apply_formula(
        &self,
        table: &Table,
        kind: FormulaKind,
        column: &str,
    ) -> Result<EnhanceOutcome> {
        let instruction = prompts::formula_instruction(kind, column);
        self.enhance(table, &instruction, true)
    }

    /// Apply a custom formula expressed in natural language.
    pub fn apply_custom_formula(&self, table: &Table, formula: &str) -> Result<EnhanceOutcome> {
        let instruction = format!("Apply the following formula to the table data: {formula}");
        self.enhance(table, &instruction, true)
    }

    /// Answer a question about a table. Never mutates data.
    pub fn ask(&self, table: &Table, question: &str) -> Result<String> {
        let csv = serialize_delimited(table, DEFAULT_DELIMITER);
        let answer = self.complete(&prompts::question(&csv, question), None)?;
        Ok(answer.trim().to_string())
    }

    /// Generate a short narrative analysis of a table.
    pub fn story(&self, table: &Table) -> Result<String> {
        self.ask(table, &prompts::data_story())
    }

    fn complete(&self, prompt: &str, image: Option<&ImagePart>) -> Result<String> {
        debug!(provider = self.provider.name(), "sending completion request");
        self.provider
            .complete(prompt, image)
            .map_err(|e| WranglingError::Oracle(e.to_string()))
    }

    fn complete_to_table(&self, prompt: &str, image: Option<&ImagePart>) -> Result<Table> {
        let response = self.complete(prompt, image)?;
        let cleaned = strip_code_fences(&response);
        parse_delimited(cleaned, DEFAULT_DELIMITER)
    }
}

/// Remove a wrapping Markdown code fence from a model response.
///
/// Models regularly ignore "CSV only" and wrap the payload in ```` ```csv
/// ... ``` ````. Anything outside a fence is left alone.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line ("csv", "text", or empty).
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => return trimmed,
    };
    body.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

// ============================================================================
// Tests
// ============================================================================
