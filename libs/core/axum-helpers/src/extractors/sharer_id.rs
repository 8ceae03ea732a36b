use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

/// Name of the header carrying the acting user's id
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the `X-Sharer-User-Id` identity header.
///
/// Endpoints acting on behalf of a user take this instead of a path or
/// body field. A missing or malformed header is a 400, existence of the
/// user is checked later by the service layer.
pub struct SharerId(pub Uuid);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::Validation(format!("{SHARER_USER_ID_HEADER} header is required"))
            })?
            .to_str()
            .map_err(|_| {
                AppError::Validation(format!("{SHARER_USER_ID_HEADER} header is not valid UTF-8"))
            })?;

        let id = Uuid::parse_str(raw).map_err(|_| {
            AppError::Validation(format!(
                "{SHARER_USER_ID_HEADER} header must be a valid UUID, got '{raw}'"
            ))
        })?;

        Ok(SharerId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn echo_sharer(SharerId(id): SharerId) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new().route("/items", get(echo_sharer))
    }

    #[tokio::test]
    async fn test_header_present_and_valid() {
        let id = Uuid::now_v7();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/items")
                    .header(SHARER_USER_ID_HEADER, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_header_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/items")
                    .header(SHARER_USER_ID_HEADER, "42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
