//! Table Wrangling Pipeline Library
//!
//! An AI-optional library for turning messy pasted text, file contents, and
//! images into structured tables, then reshaping them with natural-language
//! instructions.
//!
//! # Overview
//!
//! This library provides table transformation capabilities including:
//!
//! - **Input Routing**: Keyword rules pick a structuring strategy per input
//! - **Delimiter Sniffing**: Already-delimited text is parsed directly, no AI
//! - **AI Structuring**: Free text, files, and images become tables through a
//!   pluggable provider
//! - **Deterministic Fallback**: Provider failures degrade to a best-effort
//!   parse instead of an error
//! - **Enhancements**: Named cleanups (clean, detect categories, merge, fill)
//!   plus free-form AI instructions and formulas
//! - **Queries**: Natural-language questions with deterministic sort,
//!   deduplicate, and filter mutations
//! - **Version History**: Append-only snapshots with a cursor and diffs
//! - **Chart Specs**: Renderer-agnostic chart descriptions derived from
//!   column types
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use table_wrangler::{Pipeline, PipelineConfig, TransformInput};
//! use table_wrangler::ai::GeminiProvider;
//! use std::sync::Arc;
//!
//! // Option 1: With an AI provider
//! let provider = Arc::new(GeminiProvider::new(api_key));
//!
//! let pipeline = Pipeline::builder().provider(provider).build()?;
//!
//! let table = pipeline.transform(&TransformInput::Text(
//!     "Alice sold 40 units in March, Bob sold 52 in April".to_string(),
//! ))?;
//!
//! // Option 2: Deterministic only (no AI required)
//! let config = PipelineConfig::builder().use_ai(false).build();
//! let pipeline = Pipeline::builder().config(config).build()?;
//!
//! let table = pipeline.transform(&TransformInput::Text(
//!     "Name,Sales\nAlice,40\nBob,52".to_string(),
//! ))?;
//!
//! println!("{} rows, {} columns", table.rows.len(), table.columns.len());
//! ```
//!
//! # AI Providers
//!
//! The library supports multiple AI providers through the [`ai::AIProvider`]
//! trait. Currently implemented providers:
//!
//! - [`ai::GeminiProvider`] - Google Gemini API (text and images)
//! - [`ai::OpenRouterProvider`] - OpenRouter API (text only)
//! - [`ai::ProviderChain`] - tries providers in order until one succeeds
//!
//! To implement your own provider, see the [`ai`] module documentation.
//!
//! # Configuration
//!
//! Use [`PipelineConfig`] to customize pipeline behavior:
//!
//! ```rust,ignore
//! use table_wrangler::PipelineConfig;
//!
//! let config = PipelineConfig::builder()
//!     .delimiter(';')             // Sniff and parse on semicolons
//!     .sniff_match_ratio(0.9)     // 90% of lines must agree
//!     .use_ai(false)              // Deterministic paths only
//!     .build();
//! ```

pub mod ai;
pub mod chart;
pub mod config;
pub mod enhance;
pub mod error;
pub mod fallback;
pub mod history;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod router;
pub mod structurer;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use chart::{generate_chart, ChartSpec, ChartType};
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use enhance::Enhancement;
pub use error::{Result as WranglingResult, ResultExt, WranglingError};
pub use fallback::fallback_transform;
pub use history::{VersionDiff, VersionHistory, Workspace};
pub use parser::{is_delimited, parse_delimited, serialize_delimited};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use query::apply_query_mutation;
pub use router::{classify, Strategy};
pub use structurer::Structurer;
pub use table::{row_from_pairs, Row, Table, Value};
pub use types::{
    EnhanceOutcome, FormulaKind, QueryOutcome, Transformation, TransformInput,
};
