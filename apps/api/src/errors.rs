use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::prompt_builder::PromptError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid repository URL: {0}")]
    InvalidRepositoryUrl(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Repository fetch failed{}: {message}", status_suffix(.status))]
    RepositoryFetch { status: Option<u16>, message: String },

    #[error("Generation backend error: {0}")]
    GenerationBackend(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::UnsupportedContentType(tag) => AppError::UnsupportedContentType(tag),
            invalid @ PromptError::InvalidPayload { .. } => {
                AppError::InvalidPayload(invalid.to_string())
            }
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::GenerationBackend(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedContentType(tag) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_CONTENT_TYPE",
                format!("Unsupported content type: {tag}"),
            ),
            AppError::InvalidPayload(msg) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", msg.clone()),
            AppError::InvalidRepositoryUrl(url) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REPOSITORY_URL",
                format!("Not a recognizable GitHub repository URL: {url}"),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::RepositoryFetch { .. } => {
                tracing::error!("{self}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REPOSITORY_FETCH_ERROR",
                    self.to_string(),
                )
            }
            AppError::GenerationBackend(msg) => {
                tracing::error!("Generation backend error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_BACKEND_ERROR",
                    self.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
