pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
///
/// `error` carries the error category, `message` the human-readable detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category, e.g. "NotFoundError"
    pub error: String,
    /// Human-readable description of what went wrong
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type shared by all domains.
///
/// Each variant maps to one HTTP status and one error category in the
/// response body. Domain errors convert into this type at the handler
/// boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    IneligibleForComment(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidState(_)
            | AppError::IneligibleForComment(_)
            | AppError::JsonRejection(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error category serialized into the `error` field of the body
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::JsonRejection(_) | AppError::InvalidInput(_) => {
                "ValidationError"
            }
            AppError::InvalidState(_) => "InvalidStateError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::AlreadyExists(_) => "AlreadyExistsError",
            AppError::IneligibleForComment(_) => "IneligibleForCommentError",
            AppError::Database(_) | AppError::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Hide internal detail from clients, but keep it in the logs
        let message = match &self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            AppError::InvalidInput(errors) => format_validation_errors(errors),
            other => other.to_string(),
        };

        if status.is_client_error() {
            tracing::warn!(status = %status, message = %message, "Request failed");
        }

        let body = ErrorResponse::new(self.category(), message);
        (status, Json(body)).into_response()
    }
}

/// Flatten validator's per-field error map into a single readable message
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let details = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {details}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

pub type AppResult<T> = Result<T, AppError>;
