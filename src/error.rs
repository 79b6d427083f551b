//! Custom error types for the data wrangling pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable so an API layer can forward them to a frontend as
//! `{ code, message }` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the wrangling pipeline.
#[derive(Error, Debug)]
pub enum WranglingError {
    /// The AI provider call itself failed (network, auth, rate limit, timeout).
    #[error("AI provider error: {0}")]
    Oracle(String),

    /// The AI provider returned a response that cannot be interpreted as a table.
    #[error("Could not parse response as a table: {0}")]
    Parse(String),

    /// Caller-supplied input failed basic shape checks.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Version history selection index out of range.
    #[error("Version index {index} out of range (history has {len} versions)")]
    VersionIndex { index: usize, len: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with the "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<WranglingError>,
    },
}

impl WranglingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        WranglingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(_) => "ORACLE_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::VersionIndex { .. } => "INDEX_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::Http(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error can be recovered by the heuristic fallback.
    ///
    /// Only the top-level transform path is allowed to recover; enhancement
    /// and query mutations must surface these to the user.
    pub fn is_fallback_recoverable(&self) -> bool {
        match self {
            Self::Oracle(_) | Self::Parse(_) => true,
            #[cfg(feature = "ai")]
            Self::Http(_) => true,
            Self::WithContext { source, .. } => source.is_fallback_recoverable(),
            _ => false,
        }
    }
}

/// Serialize implementation for API-boundary compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for WranglingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("WranglingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for wrangling operations.
pub type Result<T> = std::result::Result<T, WranglingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
