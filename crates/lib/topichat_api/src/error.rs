//! Application error types.
//!
//! Every variant maps to a fixed client-facing message. Detail carried by a
//! variant is logged and never sent to the caller.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use topichat_core::invoker::InvocationError;
use topichat_core::request::ValidationError;
use tracing::error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message or topic missing")]
    Validation,

    #[error("Failed to get response from AI model: {0}")]
    ModelInvocation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            AppError::ModelInvocation(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Validation => "Message or topic missing",
            AppError::ModelInvocation(_) => "Failed to get response from AI model",
            AppError::Internal(_) => "An internal server error occurred",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation => {}
            AppError::ModelInvocation(detail) => {
                error!(detail = %detail, "chat request failed at model invocation");
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "error during chat processing");
            }
        }
        let body = Json(ErrorBody {
            error: self.public_message().to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(_: ValidationError) -> Self {
        AppError::Validation
    }
}

impl From<InvocationError> for AppError {
    fn from(e: InvocationError) -> Self {
        match e {
            InvocationError::Model(detail) => AppError::ModelInvocation(detail),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Internal(format!("unreadable request body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("parse JSON"))
    }

    #[tokio::test]
    async fn validation_maps_to_400() {
        let (status, json) = body_json(AppError::from(ValidationError)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "Message or topic missing"}));
    }

    #[tokio::test]
    async fn model_failure_hides_detail() {
        let err = AppError::from(InvocationError::Model("api key invalid: sk-123".into()));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            serde_json::json!({"error": "Failed to get response from AI model"})
        );
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let (status, json) = body_json(AppError::Internal("stack trace".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            serde_json::json!({"error": "An internal server error occurred"})
        );
    }
}
