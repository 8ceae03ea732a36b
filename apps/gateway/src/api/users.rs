//! User endpoints: validate shapes, forward to the server tier

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{AppResult, UuidPath, ValidatedJson};
use domain_users::{CreateUser, UpdateUser};
use reqwest::Method;

use crate::proxy::ServerClient;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(client)
}

async fn list_users(State(client): State<ServerClient>) -> AppResult<Response> {
    client.forward(Method::GET, "/users", None).await
}

async fn create_user(
    State(client): State<ServerClient>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AppResult<Response> {
    client
        .forward_json(Method::POST, "/users", None, &input)
        .await
}

async fn get_user(
    State(client): State<ServerClient>,
    UuidPath(id): UuidPath,
) -> AppResult<Response> {
    client
        .forward(Method::GET, &format!("/users/{id}"), None)
        .await
}

async fn update_user(
    State(client): State<ServerClient>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> AppResult<Response> {
    client
        .forward_json(Method::PATCH, &format!("/users/{id}"), None, &input)
        .await
}

async fn delete_user(
    State(client): State<ServerClient>,
    UuidPath(id): UuidPath,
) -> AppResult<Response> {
    client
        .forward(Method::DELETE, &format!("/users/{id}"), None)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    // Rejections happen before forwarding, so no upstream is listening
    fn app() -> Router {
        router(ServerClient::new("http://127.0.0.1:1"))
    }

    #[tokio::test]
    async fn test_create_user_malformed_email_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"name": "Alice", "email": "nope"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_update_user_malformed_email_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/{}", uuid::Uuid::now_v7()))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"email": "nope"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_path_id_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
