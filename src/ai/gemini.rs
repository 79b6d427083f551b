//! Google Gemini AI provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`AIProvider`] trait for Google's Gemini API (<https://ai.google.dev/>).
//!
//! Gemini is the primary provider: it is multimodal, so both text prompts
//! and image structuring requests go through the same endpoint.

use std::time::Duration;

use super::{AIProvider, ImagePart};
use anyhow::{anyhow, Result};
use base64::Engine;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Default Gemini API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";

/// Default model for table structuring and enhancement.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default temperature (low, but not zero: cleanup prompts benefit from a
/// little flexibility in header naming).
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default max tokens for responses. Tables can be large.
const DEFAULT_MAX_TOKENS: u32 = 2048;

// Gemini API request structures
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    /// Base64-encoded image bytes.
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

// Gemini API response structures
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// The model to use (e.g., "gemini-2.0-flash").
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

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Default)]
pub struct GeminiConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl GeminiConfigBuilder {
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
    pub fn build(self) -> GeminiConfig {
        GeminiConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Google Gemini AI provider for table structuring and enhancement.
///
/// # Example
///
/// ```rust,ignore
/// use table_wrangler::ai::{GeminiProvider, GeminiConfig};
///
/// // Simple usage with defaults
/// let provider = GeminiProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = GeminiConfig::builder()
///     .model("gemini-2.0-flash")
///     .temperature(0.2)
///     .build();
/// let provider = GeminiProvider::with_config("your-api-key", config)?;
/// ```
pub struct GeminiProvider {
    api_key: String,
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, GeminiConfig::default())
    }

    /// Create a new Gemini provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
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

    fn build_request(&self, prompt: &str, image: Option<&ImagePart>) -> GeminiRequest {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = image {
            parts.push(RequestPart {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                }),
            });
        }
        parts.push(RequestPart {
            text: Some(prompt.to_owned()),
            inline_data: None,
        });

        GeminiRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }

    fn call_api(&self, request: &GeminiRequest) -> Result<String> {
        // Build URL: {base_url}{model}:generateContent?key={api_key}
        let url = format!(
            "{}{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Gemini API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: GeminiResponse = response.json()?;
        extract_text(&result)
    }
}

/// Extract text from the first candidate's content parts.
///
/// Handles optional fields gracefully: Gemini may return empty responses or
/// responses blocked by safety filters.
fn extract_text(response: &GeminiResponse) -> Result<String> {
    response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|c| {
            match c.finish_reason.as_deref() {
                Some("SAFETY") | Some("BLOCKED") => None,
                _ => c.content.as_ref(),
            }
        })
        .and_then(|content| content.parts.as_ref())
        .and_then(|parts| parts.first())
        .map(|p| p.text.clone())
        .ok_or_else(|| anyhow!("No response content from Gemini API"))
}

impl AIProvider for GeminiProvider {
    fn complete(&self, prompt: &str, image: Option<&ImagePart>) -> Result<String> {
        let request = self.build_request(prompt, image);
        self.call_api(&request)
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

// ============================================================================
// Tests
// ============================================================================
