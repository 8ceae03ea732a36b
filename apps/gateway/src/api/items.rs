//! Item endpoints: validate shapes, forward to the server tier

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{AppResult, SharerId, UuidPath, ValidatedJson};
use domain_items::{CreateComment, CreateItem, Item, SearchQuery, UpdateItem};
use reqwest::Method;

use crate::proxy::ServerClient;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_own_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(client)
}

async fn list_own_items(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
) -> AppResult<Response> {
    client.forward(Method::GET, "/items", Some(user_id)).await
}

async fn create_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> AppResult<Response> {
    client
        .forward_json(Method::POST, "/items", Some(user_id), &input)
        .await
}

/// Blank search text never reaches the server tier
async fn search_items(
    State(client): State<ServerClient>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    if query.text.trim().is_empty() {
        return Ok(Json(Vec::<Item>::new()).into_response());
    }

    client
        .forward_with_query(
            Method::GET,
            "/items/search",
            None,
            &[("text", query.text.as_str())],
        )
        .await
}

async fn get_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> AppResult<Response> {
    client
        .forward(Method::GET, &format!("/items/{id}"), Some(user_id))
        .await
}

async fn update_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> AppResult<Response> {
    client
        .forward_json(Method::PATCH, &format!("/items/{id}"), Some(user_id), &input)
        .await
}

async fn add_comment(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> AppResult<Response> {
    let path = format!("/items/{id}/comment");
    client
        .forward_json(Method::POST, &path, Some(user_id), &input)
        .await
}
