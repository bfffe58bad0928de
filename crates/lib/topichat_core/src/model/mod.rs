//! Text-generation capability.
//!
//! The relay talks to its model through [`TextGenerator`] so handlers can be
//! exercised against stubs. [`gemini::GeminiClient`] is the production
//! implementation.

pub mod config;
pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use config::ModelConfig;

/// Text produced by one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    /// Reason the service gave for blocking the prompt, if any.
    pub block_reason: Option<String>,
}

/// A generation call that did not yield usable text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{detail}")]
pub struct GenerationFailure {
    pub detail: String,
    /// Response metadata that was available when the call failed.
    pub partial: Option<GenerationResult>,
}

impl GenerationFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            partial: None,
        }
    }

    pub fn with_partial(mut self, partial: GenerationResult) -> Self {
        self.partial = Some(partial);
        self
    }

    /// Block reason recovered from partial response metadata.
    pub fn block_reason(&self) -> Option<&str> {
        self.partial.as_ref()?.block_reason.as_deref()
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<GenerationResult, GenerationFailure>;

    /// Identifier for logging.
    fn name(&self) -> &str;
}
