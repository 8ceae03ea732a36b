use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    SharerId, UuidPath, ValidatedJson,
    errors::responses::{InternalErrorResponse, NotFoundResponse, ValidationErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{AnswerItem, CreateRequest, ItemRequest, PageQuery, RequestView};
use crate::repository::RequestRepository;
use crate::service::RequestService;

/// OpenAPI documentation for the Requests API
#[derive(OpenApi)]
#[openapi(
    paths(list_own_requests, create_request, list_other_requests, get_request),
    components(
        schemas(ItemRequest, CreateRequest, RequestView, AnswerItem),
        responses(ValidationErrorResponse, NotFoundResponse, InternalErrorResponse)
    ),
    tags(
        (name = "Requests", description = "Wishes for items not yet offered")
    )
)]
pub struct ApiDoc;

/// Create the requests router with all HTTP endpoints
pub fn router<R: RequestRepository + 'static>(service: RequestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// List the caller's own requests with answer items
#[utoipa::path(
    get,
    path = "",
    tag = "Requests",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Requests posted by the caller", body = Vec<RequestView>),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn list_own_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<RequestView>>> {
    let requests = service.get_own_requests(user_id).await?;
    Ok(Json(requests))
}

/// Post a new request
#[utoipa::path(
    post,
    path = "",
    tag = "Requests",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created successfully", body = ItemRequest),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn create_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> RequestResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Browse other users' requests, paginated
#[utoipa::path(
    get,
    path = "/all",
    tag = "Requests",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<RequestView>),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn list_other_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> RequestResult<Json<Vec<RequestView>>> {
    let requests = service
        .get_other_requests(user_id, page.from, page.size)
        .await?;
    Ok(Json(requests))
}

/// Get a request by ID with its answer items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Requests",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID"),
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = RequestView),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn get_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> RequestResult<Json<RequestView>> {
    let request = service.get_request(user_id, id).await?;
    Ok(Json(request))
}
