//! Configuration types for the wrangling pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};

use crate::parser::{DEFAULT_DELIMITER, DEFAULT_MATCH_RATIO};

/// Configuration for the wrangling pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use table_wrangler::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .delimiter(';')
///     .use_ai(false)
///     .build();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Delimiter used when sniffing and parsing pasted text.
    /// Default: ','
    pub delimiter: char,

    /// Fraction of lines whose delimiter count must match the header line
    /// for text to count as already-delimited (0.0 - 1.0).
    /// Default: 0.8 (80%)
    pub sniff_match_ratio: f64,

    /// Whether to use the AI provider for structuring and enhancement.
    /// When false, or when no provider is configured, only the
    /// deterministic paths run.
    /// Default: true
    pub use_ai: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            sniff_match_ratio: DEFAULT_MATCH_RATIO,
            use_ai: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.sniff_match_ratio) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "sniff_match_ratio".to_string(),
                value: self.sniff_match_ratio,
            });
        }
        if self.delimiter == '"' || self.delimiter == '\n' {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid delimiter {0:?} (quote and newline are reserved)")]
    InvalidDelimiter(char),
}

/// Builder for [`PipelineConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    delimiter: Option<char>,
    sniff_match_ratio: Option<f64>,
    use_ai: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the delimiter used for sniffing and parsing.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the sniffer match ratio (0.0 - 1.0).
    pub fn sniff_match_ratio(mut self, ratio: f64) -> Self {
        self.sniff_match_ratio = Some(ratio);
        self
    }

    /// Enable or disable AI-backed structuring.
    pub fn use_ai(mut self, use_ai: bool) -> Self {
        self.use_ai = Some(use_ai);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PipelineConfig {
        PipelineConfig {
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
            sniff_match_ratio: self.sniff_match_ratio.unwrap_or(DEFAULT_MATCH_RATIO),
            use_ai: self.use_ai.unwrap_or(true),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.sniff_match_ratio, 0.8);
        assert!(config.use_ai);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .delimiter(';')
            .sniff_match_ratio(0.9)
            .use_ai(false)
            .build();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.sniff_match_ratio, 0.9);
        assert!(!config.use_ai);
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let config = PipelineConfig::builder().sniff_match_ratio(1.5).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_reserved_delimiters() {
        assert!(PipelineConfig::builder().delimiter('"').build().validate().is_err());
        assert!(PipelineConfig::builder().delimiter('\n').build().validate().is_err());
    }
}
