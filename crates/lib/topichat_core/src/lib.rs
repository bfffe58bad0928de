//! # topichat_core
//!
//! Core domain logic for Topichat: request validation, prompt construction,
//! model configuration, and the model invocation fallback chain.

pub mod config;
pub mod invoker;
pub mod model;
pub mod prompt;
pub mod request;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
