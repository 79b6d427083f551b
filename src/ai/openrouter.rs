//! OpenRouter AI provider implementation.
//!
//! This module provides the [`OpenRouterProvider`] which implements the
//! [`AIProvider`] trait for the OpenRouter API (<https://openrouter.ai/>).
//!
//! OpenRouter gives access to many LLM models through a unified API, making
//! it a useful fallback when no Gemini key is configured. It is text-only
//! here: image structuring requests are rejected so a provider chain can
//! move on to a multimodal backend.

use super::{AIProvider, ImagePart};
use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenRouter API endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for table structuring and enhancement.
const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default temperature for model responses.
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default max tokens for responses. Tables can be large.
const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenRouterResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// The model to use (e.g., "deepseek/deepseek-chat", "openai/gpt-4").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OpenRouterConfig {
    /// Create a new configuration builder.
    pub fn builder() -> OpenRouterConfigBuilder {
        OpenRouterConfigBuilder::default()
    }
}

/// Builder for [`OpenRouterConfig`].
#[derive(Default)]
pub struct OpenRouterConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl OpenRouterConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenRouterConfig {
        OpenRouterConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// OpenRouter AI provider for table structuring and enhancement.
///
/// # Example
///
/// ```rust,ignore
/// use table_wrangler::ai::{OpenRouterProvider, OpenRouterConfig};
///
/// // Simple usage with defaults
/// let provider = OpenRouterProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = OpenRouterConfig::builder()
///     .model("openai/gpt-4")
///     .temperature(0.2)
///     .build();
/// let provider = OpenRouterProvider::with_config("your-api-key", config)?;
/// ```
pub struct OpenRouterProvider {
    api_key: String,
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, OpenRouterConfig::default())
    }

    /// Create a new OpenRouter provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = OpenRouterRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "OpenRouter API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: OpenRouterResponse = response.json()?;
        result
            .choices
            .as_ref()
            .and_then(|choices| choices.first())
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.clone())
            .ok_or_else(|| anyhow!("No response content from OpenRouter API"))
    }
}

impl AIProvider for OpenRouterProvider {
    fn complete(&self, prompt: &str, image: Option<&ImagePart>) -> Result<String> {
        if image.is_some() {
            return Err(anyhow!("OpenRouter provider does not support image input"));
        }
        self.call_api(prompt)
    }

    fn name(&self) -> &str {
        "OpenRouter"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response() {
        let json = r#"{
            "choices": [{
                "message": {"role": "assistant", "content": "Name,Age\nAlice,30"}
            }]
        }"#;

        let response: OpenRouterResponse = serde_json::from_str(json).unwrap();
        let content = response.choices.unwrap()[0]
            .message
            .as_ref()
            .unwrap()
            .content
            .clone();
        assert_eq!(content, "Name,Age\nAlice,30");
    }

    #[test]
    fn test_parse_response_with_empty_choices() {
        let json = r#"{"choices": []}"#;

        let response: OpenRouterResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.unwrap().is_empty());
    }

    #[test]
    fn test_image_input_is_rejected() {
        let provider = OpenRouterProvider::new("test-key").unwrap();
        let image = ImagePart {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        let err = provider.complete("extract", Some(&image)).unwrap_err();
        assert!(err.to_string().contains("image"));
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = OpenRouterConfig::builder().build();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_provider_name_and_model() {
        let provider = OpenRouterProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "OpenRouter");
        assert_eq!(provider.model(), Some(DEFAULT_MODEL));
    }
}
