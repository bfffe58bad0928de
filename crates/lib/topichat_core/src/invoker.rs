//! Model invocation with the text → safety explanation → generic fallback
//! chain.
//!
//! A failed call whose partial metadata names a block reason is still an
//! `Ok` reply. Only failures with no recoverable reason become
//! [`InvocationError`].

use thiserror::Error;
use tracing::{error, warn};

use crate::model::{GenerationResult, ModelConfig, TextGenerator};

/// Reply used when the model returns no text and gives no reason.
pub const GENERIC_FALLBACK: &str = "Sorry, I couldn't generate a response for that.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// The model call failed and no block reason could be recovered.
    #[error("Model invocation failed: {0}")]
    Model(String),
}

/// Explanation for a successful call whose empty text came with a block reason.
pub fn safety_explanation(reason: &str) -> String {
    format!("I cannot provide a response due to safety settings (Reason: {reason}).")
}

/// Explanation for a failed call whose partial metadata carried a block reason.
pub fn blocked_notice(reason: &str) -> String {
    format!("Blocked by API safety settings: {reason}")
}

/// Sends `prompt` to `generator` and turns the outcome into reply text.
pub async fn invoke(
    generator: &dyn TextGenerator,
    prompt: &str,
    config: &ModelConfig,
) -> Result<String, InvocationError> {
    match generator.generate(prompt, config).await {
        Ok(result) => Ok(reply_text(result)),
        Err(failure) => {
            error!(generator = generator.name(), error = %failure, "model API error");
            match failure.block_reason() {
                Some(reason) => {
                    warn!(generator = generator.name(), reason, "prompt blocked by safety settings");
                    Ok(blocked_notice(reason))
                }
                None => Err(InvocationError::Model(failure.detail)),
            }
        }
    }
}

fn reply_text(result: GenerationResult) -> String {
    let text = result.text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    match result.block_reason.as_deref() {
        Some(reason) => safety_explanation(reason),
        None => GENERIC_FALLBACK.to_string(),
    }
}
