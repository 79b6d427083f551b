//! AI provider trait for abstracting LLM interactions.
//!
//! This module defines the [`AIProvider`] trait that enables support for
//! multiple AI providers (Gemini, OpenRouter, local models, etc.) without
//! changing the structuring or enhancement logic.
//!
//! # Implementing a New Provider
//!
//! To add a new AI provider:
//!
//! 1. Create a new file in `src/ai/` (e.g., `ollama.rs`)
//! 2. Implement the [`AIProvider`] trait for your provider struct
//! 3. Export the provider in `src/ai/mod.rs`
//!
//! # Example
//!
//! ```rust,ignore
//! use table_wrangler::ai::{AIProvider, GeminiProvider};
//!
//! let provider = GeminiProvider::new("your-api-key")?;
//!
//! let pipeline = Pipeline::builder()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

use anyhow::Result;

/// An image attached to a completion request.
#[derive(Debug, Clone)]
pub struct ImagePart {
    /// MIME type of the image (e.g., "image/png").
    pub mime_type: String,
    /// Raw image bytes, encoded by the provider as its API requires.
    pub data: Vec<u8>,
}

/// Trait for AI providers that can complete text prompts.
///
/// This trait abstracts the interaction with various LLM backends. All
/// structuring, enhancement, and query prompts flow through [`complete`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
///
/// # Error Handling
///
/// Implementations should return meaningful errors via `anyhow::Result`.
/// The pipeline falls back to deterministic parsing when structuring fails;
/// enhancement and query calls surface the error to the caller.
///
/// [`complete`]: AIProvider::complete
pub trait AIProvider: Send + Sync {
    /// Send a prompt (and optionally an image) and return the raw response
    /// text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails, the response cannot be
    /// parsed, or the provider does not support image input.
    fn complete(&self, prompt: &str, image: Option<&ImagePart>) -> Result<String>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;

    /// Get the model being used by this provider.
    ///
    /// Returns `None` if the provider doesn't expose model information.
    fn model(&self) -> Option<&str> {
        None
    }
}
