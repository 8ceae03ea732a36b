use axum::{
    Json,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use super::ErrorResponse;

/// Fallback handler for unmatched routes
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "NotFoundError",
            format!("No route for {uri}"),
        )),
    )
}

/// Handler for routes hit with an unsupported HTTP method
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new(
            "MethodNotAllowedError",
            "Method not allowed for this endpoint",
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_not_found_includes_uri() {
        let uri: Uri = "/missing/route".parse().unwrap();
        let response = not_found(uri).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_not_allowed_status() {
        let response = method_not_allowed().await.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
