//! AI provider integration.
//!
//! The [`AIProvider`] trait abstracts the LLM backend; the concrete HTTP
//! providers live behind the `ai` feature so the deterministic parts of the
//! crate build without reqwest.

mod chain;
mod provider;

#[cfg(feature = "ai")]
mod gemini;
#[cfg(feature = "ai")]
mod openrouter;

pub use chain::ProviderChain;
pub use provider::{AIProvider, ImagePart};

#[cfg(feature = "ai")]
pub use gemini::{GeminiConfig, GeminiConfigBuilder, GeminiProvider};
#[cfg(feature = "ai")]
pub use openrouter::{OpenRouterConfig, OpenRouterConfigBuilder, OpenRouterProvider};
