use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Convert BookingError to AppError for standardized error responses
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::BookingNotFound(id) => {
                AppError::NotFound(format!("Booking {} not found", id))
            }
            BookingError::ItemNotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            BookingError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            BookingError::Validation(msg) => AppError::Validation(msg),
            BookingError::InvalidState(msg) => AppError::InvalidState(msg),
            BookingError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Database(err.to_string())
    }
}
