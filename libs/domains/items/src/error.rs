use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Request not found: {0}")]
    RequestNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    IneligibleForComment(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::ItemNotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            ItemError::RequestNotFound(id) => {
                AppError::NotFound(format!("Request {} not found", id))
            }
            ItemError::Validation(msg) => AppError::Validation(msg),
            ItemError::IneligibleForComment(msg) => AppError::IneligibleForComment(msg),
            ItemError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ItemError {
    fn from(err: sea_orm::DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}
