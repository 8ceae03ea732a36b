use axum::{extract::{FromRequestParts, Path}, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

/// Path extractor for a single UUID segment.
///
/// Malformed ids become a 400 with the standard error body rather than
/// axum's default path rejection.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Missing id path parameter".to_string()))?;

        let id = Uuid::parse_str(&raw)
            .map_err(|_| AppError::Validation(format!("Invalid UUID in path: {raw}")))?;

        Ok(UuidPath(id))
    }
}
