use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    SharerId, UuidPath, ValidatedJson,
    errors::responses::{
        InternalErrorResponse, InvalidStateResponse, NotFoundResponse, ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::{
    ApproveQuery, BookingStatus, BookingView, CreateBooking, ItemRef, StateQuery, UserRef,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_booking,
        list_own_bookings,
        list_owner_bookings,
        get_booking,
        decide_booking
    ),
    components(
        schemas(BookingView, CreateBooking, BookingStatus, ItemRef, UserRef),
        responses(
            ValidationErrorResponse,
            InvalidStateResponse,
            NotFoundResponse,
            InternalErrorResponse
        )
    ),
    tags(
        (name = "Bookings", description = "Reservations of shared items")
    )
)]
pub struct ApiDoc;

/// Create the bookings router with all HTTP endpoints
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(shared_service)
}

/// Request a booking; it starts out waiting for the owner's decision
#[utoipa::path(
    post,
    path = "",
    tag = "Bookings",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created successfully", body = BookingView),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the caller's bookings, newest start date first
#[utoipa::path(
    get,
    path = "",
    tag = "Bookings",
    params(
        StateQuery,
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Bookings made by the caller", body = Vec<BookingView>),
        (status = 400, response = InvalidStateResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn list_own_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingView>>> {
    let bookings = service.get_bookings_by_booker(user_id, query.state).await?;
    Ok(Json(bookings))
}

/// List bookings on the caller's items, newest start date first
#[utoipa::path(
    get,
    path = "/owner",
    tag = "Bookings",
    params(
        StateQuery,
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingView>),
        (status = 400, response = InvalidStateResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn list_owner_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingView>>> {
    let bookings = service.get_bookings_by_owner(user_id, query.state).await?;
    Ok(Json(bookings))
}

/// Get one booking; visible to its booker and the item's owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingView),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<BookingView>> {
    let booking = service.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// Approve or reject a waiting booking; only the item's owner may decide
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID"),
        ApproveQuery,
        ("X-Sharer-User-Id" = Uuid, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Booking decided successfully", body = BookingView),
        (status = 400, response = InvalidStateResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalErrorResponse)
    )
)]
async fn decide_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    Query(query): Query<ApproveQuery>,
) -> BookingResult<Json<BookingView>> {
    let booking = service.decide_booking(user_id, id, query.approved).await?;
    Ok(Json(booking))
}
