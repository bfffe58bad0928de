//! Chat request decoding and validation.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Raised when a chat request lacks a message or a topic.
///
/// Carries no request data so that raw input is never echoed back.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Message or topic missing")]
pub struct ValidationError;

/// Incoming `POST /chat` body.
///
/// Both fields stay loosely typed until [`ChatRequest::validate`] runs, so a
/// missing, `null`, or non-string field is a validation failure rather than a
/// decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub topic: Option<Value>,
}

/// A chat request whose message and topic are both present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChat {
    pub message: String,
    pub topic: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            topic: Some(Value::String(topic.into())),
        }
    }

    pub fn validate(self) -> Result<ValidatedChat, ValidationError> {
        let message = non_empty(self.message).ok_or(ValidationError)?;
        let topic = non_empty(self.topic).ok_or(ValidationError)?;
        Ok(ValidatedChat { message, topic })
    }
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
