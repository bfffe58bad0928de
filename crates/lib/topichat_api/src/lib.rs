//! # topichat_api
//!
//! HTTP API library for Topichat.

pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use topichat_core::config::RelayConfig;
use topichat_core::model::{ModelConfig, TextGenerator};
use tower_http::trace::TraceLayer;

use crate::handlers::{chat, index};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model used to answer chat messages.
    pub generator: Arc<dyn TextGenerator>,
    /// Generation parameters and safety thresholds, fixed for the process.
    pub model_config: Arc<ModelConfig>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, model_config: ModelConfig) -> Self {
        Self {
            generator,
            model_config: Arc::new(model_config),
        }
    }

    /// State backed by the Gemini client described by `config`.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            Arc::new(config.gemini_client()),
            config.model_config.clone(),
        )
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::GET_INDEX, get(index::index_handler))
        .route(routes::GET_STATIC_SCRIPT, get(index::script_handler))
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
