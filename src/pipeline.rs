//! The main wrangling pipeline.
//!
//! This module provides the core [`Pipeline`] struct and builder
//! orchestrating the transform, enhance, query, and chart operations.

use std::sync::Arc;

use tracing::{info, warn};

use crate::ai::AIProvider;
use crate::chart::{generate_chart, ChartSpec};
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::enhance::Enhancement;
use crate::error::{Result, WranglingError};
use crate::fallback::fallback_transform;
use crate::parser::{is_delimited_with, parse_delimited};
use crate::query::apply_query_mutation;
use crate::router::{classify, Strategy};
use crate::structurer::Structurer;
use crate::table::Table;
use crate::types::{EnhanceOutcome, FormulaKind, QueryOutcome, TransformInput};

/// The main wrangling pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use table_wrangler::{Pipeline, PipelineConfig};
/// use table_wrangler::ai::GeminiProvider;
/// use table_wrangler::types::TransformInput;
/// use std::sync::Arc;
///
/// // With an AI provider
/// let provider = Arc::new(GeminiProvider::new(api_key)?);
/// let pipeline = Pipeline::builder()
///     .provider(provider)
///     .config(PipelineConfig::default())
///     .build()?;
/// let table = pipeline.transform(&TransformInput::Text(text))?;
///
/// // Without AI (deterministic paths only)
/// let pipeline = Pipeline::builder().build()?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    structurer: Option<Structurer>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Whether AI-backed operations are available.
    pub fn has_ai(&self) -> bool {
        self.structurer.is_some()
    }

    /// Transform raw input into a table.
    ///
    /// Text input is keyword-routed; text that already sniffs as delimited
    /// is parsed directly without touching the provider. Structuring
    /// failures on text input degrade to the deterministic fallback, so
    /// text transformation only fails on empty input. Image input has no
    /// deterministic fallback and surfaces provider errors.
    ///
    /// # Errors
    ///
    /// Returns [`WranglingError::Validation`] for empty input, and
    /// [`WranglingError::Oracle`]/[`WranglingError::Parse`] for failed
    /// image structuring.
    pub fn transform(&self, input: &TransformInput) -> Result<Table> {
        if input.is_empty() {
            return Err(WranglingError::Validation(
                "input contains no data".to_string(),
            ));
        }

        match (classify(input), input) {
            (Strategy::GenericTransform, TransformInput::Text(text)) => {
                if is_delimited_with(text, self.config.delimiter, self.config.sniff_match_ratio) {
                    info!("input sniffs as delimited, parsing directly");
                    return match parse_delimited(text, self.config.delimiter) {
                        Ok(table) => Ok(table),
                        Err(e) => {
                            warn!("direct parse failed ({}), using fallback", e);
                            Ok(fallback_transform(text))
                        }
                    };
                }
                Ok(self.structure_or_fallback(text, |s| s.structure_generic(text)))
            }
            (Strategy::EntityExtraction { entity_type }, TransformInput::Text(text)) => {
                Ok(self.structure_or_fallback(text, |s| s.extract_entities(text, &entity_type)))
            }
            (Strategy::TypedTable { table_type }, TransformInput::Text(text)) => {
                Ok(self.structure_or_fallback(text, |s| {
                    s.structure_typed(text, Some(&table_type), &[])
                }))
            }
            (Strategy::AiStructuring, TransformInput::File { content, file_name }) => {
                if let Some(name) = file_name {
                    info!(file = name.as_str(), "structuring file content");
                }
                Ok(self.structure_or_fallback(content, |s| s.structure_file(content)))
            }
            (Strategy::AiStructuring, TransformInput::Image { data, mime_type }) => {
                self.structurer()?.structure_image(data, mime_type)
            }
            // classify only returns AiStructuring for non-text input.
            (strategy, _) => unreachable!("strategy {:?} for text input", strategy),
        }
    }

    /// Transform free text into a table with an explicit type and column
    /// list, bypassing keyword routing.
    ///
    /// # Errors
    ///
    /// Requires a provider; returns [`WranglingError::Oracle`] when none
    /// is configured or the call fails.
    pub fn transform_structured(
        &self,
        text: &str,
        table_type: Option<&str>,
        columns: &[String],
    ) -> Result<Table> {
        self.structurer()?.structure_typed(text, table_type, columns)
    }

    /// Repair messy delimited text through the provider.
    pub fn cleanup_csv(&self, csv: &str) -> Result<Table> {
        self.structurer()?.cleanup_csv(csv)
    }

    /// Apply a named deterministic enhancement. Never fails.
    pub fn enhance(&self, table: &Table, enhancement: Enhancement) -> Table {
        enhancement.apply(table)
    }

    /// Apply a freeform natural-language edit through the provider.
    ///
    /// Unlike [`transform`](Self::transform), failures surface to the
    /// caller: a failed edit must never silently replace the table.
    pub fn enhance_freeform(
        &self,
        table: &Table,
        instructions: &str,
        want_explanation: bool,
    ) -> Result<EnhanceOutcome> {
        self.structurer()?.enhance(table, instructions, want_explanation)
    }

    /// Run the comprehensive auto-clean pass through the provider.
    pub fn auto_clean(&self, table: &Table) -> Result<EnhanceOutcome> {
        self.structurer()?.auto_clean(table)
    }

    /// Apply a named formula over a column through the provider.
    pub fn apply_formula(
        &self,
        table: &Table,
        kind: FormulaKind,
        column: &str,
    ) -> Result<EnhanceOutcome> {
        self.structurer()?.apply_formula(table, kind, column)
    }

    /// Apply a custom natural-language formula through the provider.
    pub fn apply_custom_formula(&self, table: &Table, formula: &str) -> Result<EnhanceOutcome> {
        self.structurer()?.apply_custom_formula(table, formula)
    }

    /// Answer a question about the table, with a deterministic mutation
    /// when the query asks to sort, deduplicate, or filter.
    ///
    /// The answer always comes from the provider; the mutation never does.
    pub fn query(&self, table: &Table, question: &str) -> Result<QueryOutcome> {
        let answer = self.structurer()?.ask(table, question)?;
        let updated_table = apply_query_mutation(table, question);
        Ok(QueryOutcome {
            answer,
            updated_table,
        })
    }

    /// Generate a chart spec for the table. Deterministic.
    pub fn chart(&self, table: &Table) -> ChartSpec {
        generate_chart(table)
    }

    /// Generate a narrative data story through the provider.
    pub fn story(&self, table: &Table) -> Result<String> {
        self.structurer()?.story(table)
    }

    fn structurer(&self) -> Result<&Structurer> {
        self.structurer.as_ref().ok_or_else(|| {
            WranglingError::Oracle("no AI provider configured".to_string())
        })
    }

    /// Run an AI structuring closure, degrading to the deterministic
    /// fallback when no provider is configured or the call fails
    /// recoverably.
    fn structure_or_fallback<F>(&self, text: &str, structure: F) -> Table
    where
        F: FnOnce(&Structurer) -> Result<Table>,
    {
        let Some(structurer) = &self.structurer else {
            return fallback_transform(text);
        };
        match structure(structurer) {
            Ok(table) => table,
            Err(e) => {
                debug_assert!(e.is_fallback_recoverable(), "unexpected error kind: {}", e);
                warn!("AI structuring failed ({}), using fallback", e);
                fallback_transform(text)
            }
        }
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    provider: Option<Arc<dyn AIProvider>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the AI provider.
    ///
    /// Use `Arc` so the provider can be shared and reused across multiple
    /// pipelines. Without a provider the deterministic paths still work;
    /// AI-only operations return [`WranglingError::Oracle`].
    pub fn provider(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let structurer = if config.use_ai {
            self.provider.map(Structurer::new)
        } else {
            None
        };

        Ok(Pipeline { config, structurer })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ImagePart;
    use crate::table::row_from_pairs;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct ScriptedProvider {
        responses: Mutex<Vec<anyhow::Result<String>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<anyhow::Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
            })
        }
    }

    impl AIProvider for ScriptedProvider {
        fn complete(&self, _prompt: &str, _image: Option<&ImagePart>) -> anyhow::Result<String> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(anyhow!("no more scripted responses"));
            }
            responses.remove(0)
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    fn pipeline_with(responses: Vec<anyhow::Result<String>>) -> Pipeline {
        Pipeline::builder()
            .provider(ScriptedProvider::new(responses))
            .build()
            .unwrap()
    }

    fn offline_pipeline() -> Pipeline {
        Pipeline::builder().build().unwrap()
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = offline_pipeline()
            .transform(&TransformInput::Text("   ".to_string()))
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_delimited_text_parses_without_provider() {
        let table = offline_pipeline()
            .transform(&TransformInput::Text("Name,Age\nAlice,30\nBob,28".to_string()))
            .unwrap();
        assert_eq!(table.columns, vec!["Name", "Age"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_free_text_without_provider_uses_fallback() {
        let table = offline_pipeline()
            .transform(&TransformInput::Text("Name: Alice\nAge: 30".to_string()))
            .unwrap();
        assert_eq!(table.columns, vec!["Name", "Age"]);
    }

    #[test]
    fn test_free_text_with_provider_uses_ai() {
        let pipeline = pipeline_with(vec![Ok("Person,Years\nAlice,30".to_string())]);
        let table = pipeline
            .transform(&TransformInput::Text("Alice has been around thirty years".to_string()))
            .unwrap();
        assert_eq!(table.columns, vec!["Person", "Years"]);
    }

    #[test]
    fn test_provider_failure_degrades_to_fallback() {
        let pipeline = pipeline_with(vec![Err(anyhow!("backend down"))]);
        let table = pipeline
            .transform(&TransformInput::Text("just some plain words".to_string()))
            .unwrap();
        assert_eq!(table.columns, vec!["Data"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_use_ai_false_disables_provider() {
        let pipeline = Pipeline::builder()
            .provider(ScriptedProvider::new(vec![Ok("A,B\n1,2".to_string())]))
            .config(PipelineConfig::builder().use_ai(false).build())
            .build()
            .unwrap();
        assert!(!pipeline.has_ai());

        let table = pipeline
            .transform(&TransformInput::Text("plain words only here".to_string()))
            .unwrap();
        assert_eq!(table.columns, vec!["Data"]);
    }

    #[test]
    fn test_image_without_provider_is_an_error() {
        let err = offline_pipeline()
            .transform(&TransformInput::Image {
                data: vec![1, 2, 3],
                mime_type: "image/png".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "ORACLE_ERROR");
    }

    #[test]
    fn test_image_structuring_parses_response() {
        let pipeline = pipeline_with(vec![Ok("Item,Price\nCoffee,$4".to_string())]);
        let table = pipeline
            .transform(&TransformInput::Image {
                data: vec![0xFF, 0xD8],
                mime_type: "image/jpeg".to_string(),
            })
            .unwrap();
        assert_eq!(table.columns, vec!["Item", "Price"]);
    }

    #[test]
    fn test_enhance_freeform_surfaces_errors() {
        let pipeline = pipeline_with(vec![Err(anyhow!("quota"))]);
        let table = Table::new(
            vec!["A".to_string()],
            vec![row_from_pairs([("A", "1")])],
        );
        let err = pipeline.enhance_freeform(&table, "do things", false).unwrap_err();
        assert_eq!(err.error_code(), "ORACLE_ERROR");
    }

    #[test]
    fn test_query_answers_and_mutates() {
        let pipeline = pipeline_with(vec![Ok("C has the highest revenue.".to_string())]);
        let table = Table::new(
            vec!["Product".to_string(), "Revenue".to_string()],
            vec![
                row_from_pairs([("Product", "A"), ("Revenue", "$50")]),
                row_from_pairs([("Product", "C"), ("Revenue", "$80")]),
            ],
        );
        let outcome = pipeline.query(&table, "sort by revenue highest").unwrap();
        assert_eq!(outcome.answer, "C has the highest revenue.");
        let updated = outcome.updated_table.unwrap();
        assert_eq!(updated.cell_text(0, "Product"), "C");
    }

    #[test]
    fn test_query_without_mutation_keyword_leaves_table_alone() {
        let pipeline = pipeline_with(vec![Ok("The total is $130.".to_string())]);
        let table = Table::new(
            vec!["Revenue".to_string()],
            vec![row_from_pairs([("Revenue", "$130")])],
        );
        let outcome = pipeline.query(&table, "what is the total revenue?").unwrap();
        assert!(outcome.updated_table.is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = Pipeline::builder()
            .config(PipelineConfig::builder().sniff_match_ratio(2.0).build())
            .build();
        assert!(result.is_err());
    }
}
