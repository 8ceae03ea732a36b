//! Request endpoints: validate shapes and pagination, forward to the
//! server tier

use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use axum_helpers::{AppError, AppResult, SharerId, UuidPath, ValidatedJson};
use domain_requests::{CreateRequest, PageQuery};
use reqwest::Method;

use crate::proxy::ServerClient;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(client)
}

async fn list_own_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
) -> AppResult<Response> {
    client.forward(Method::GET, "/requests", Some(user_id)).await
}

async fn create_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> AppResult<Response> {
    client
        .forward_json(Method::POST, "/requests", Some(user_id), &input)
        .await
}

async fn list_other_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> AppResult<Response> {
    if page.from < 0 {
        return Err(AppError::Validation(
            "from must not be negative".to_string(),
        ));
    }
    if page.size < 1 {
        return Err(AppError::Validation("size must be at least 1".to_string()));
    }

    client
        .forward_with_query(
            Method::GET,
            "/requests/all",
            Some(user_id),
            &[
                ("from", page.from.to_string()),
                ("size", page.size.to_string()),
            ],
        )
        .await
}

async fn get_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> AppResult<Response> {
    client
        .forward(Method::GET, &format!("/requests/{id}"), Some(user_id))
        .await
}
