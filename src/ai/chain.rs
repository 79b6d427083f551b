//! Ordered fallback across multiple AI providers.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::warn;

use super::{AIProvider, ImagePart};

/// A provider that tries each wrapped provider in order until one succeeds.
///
/// Useful when a primary provider (Gemini) should be backed by a cheaper or
/// differently-keyed one (OpenRouter). A provider that rejects the request
/// outright, for example a text-only provider given an image, counts as a
/// failure and the chain moves on.
pub struct ProviderChain {
    providers: Vec<Arc<dyn AIProvider>>,
}

impl ProviderChain {
    /// Create a chain over the given providers, tried in order.
    pub fn new(providers: Vec<Arc<dyn AIProvider>>) -> Self {
        Self { providers }
    }

    /// Number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl AIProvider for ProviderChain {
    fn complete(&self, prompt: &str, image: Option<&ImagePart>) -> Result<String> {
        if self.providers.is_empty() {
            return Err(anyhow!("provider chain is empty"));
        }

        let mut failures = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            match provider.complete(prompt, image) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(provider = provider.name(), "provider failed: {}", e);
                    failures.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        Err(anyhow!("all providers failed: {}", failures.join("; ")))
    }

    fn name(&self) -> &str {
        "ProviderChain"
    }
}

// ============================================================================
// Tests
// ============================================================================
