use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    SharerId, UuidPath, ValidatedJson,
    errors::responses::{InternalErrorResponse, NotFoundResponse, ValidationErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    BookingSummary, Comment, CreateComment, CreateItem, Item, ItemView, SearchQuery, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_own_items,
        create_item,
        search_items,
        get_item,
        update_item,
        add_comment
    ),
    components(
        schemas(
            Item,
            ItemView,
            CreateItem,
            UpdateItem,
            Comment,
            CreateComment,
            BookingSummary
        ),
        responses(ValidationErrorResponse, NotFoundResponse, InternalErrorResponse)
    ),
    tags(
        (name = "Items", description = "Items offered for sharing")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// List the caller's own items with comments and booking summaries
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Items owned by the caller", body = Vec<ItemView>),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn list_own_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
) -> ItemResult<Json<Vec<ItemView>>> {
    let items = service.get_own_items(user_id).await?;
    Ok(Json(items))
}

/// List a new item owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "Items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.search_items(query.text).await?;
    Ok(Json(items))
}

/// Get one item; booking summaries appear only for the owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemView),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<ItemView>> {
    let item = service.get_item(user_id, id).await?;
    Ok(Json(item))
}

/// Update an item; only its owner may do so
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(user_id, id, input).await?;
    Ok(Json(item))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment added successfully", body = Comment),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<impl IntoResponse> {
    let comment = service.add_comment(user_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
