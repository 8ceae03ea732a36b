//! Booking endpoints: validate shapes and state filters, forward to the
//! server tier

use std::str::FromStr;

use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use axum_helpers::{AppError, AppResult, SharerId, UuidPath, ValidatedJson};
use chrono::Utc;
use domain_bookings::{ApproveQuery, CreateBooking, StateFilter, StateQuery};
use reqwest::Method;

use crate::proxy::ServerClient;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_own_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(client)
}

/// Unknown state labels are rejected here, before any forwarding
fn ensure_known_state(state: Option<String>) -> Result<Option<String>, AppError> {
    if let Some(raw) = &state {
        StateFilter::from_str(raw)
            .map_err(|_| AppError::InvalidState(format!("Unknown state: {raw}")))?;
    }
    Ok(state)
}

async fn create_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> AppResult<Response> {
    if input.start_date < Utc::now() {
        return Err(AppError::Validation(
            "Start date must not be in the past".to_string(),
        ));
    }
    if input.end_date <= input.start_date {
        return Err(AppError::Validation(
            "End date must be strictly after start date".to_string(),
        ));
    }

    client
        .forward_json(Method::POST, "/bookings", Some(user_id), &input)
        .await
}

async fn list_own_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Response> {
    match ensure_known_state(query.state)? {
        Some(state) => {
            client
                .forward_with_query(
                    Method::GET,
                    "/bookings",
                    Some(user_id),
                    &[("state", state.as_str())],
                )
                .await
        }
        None => client.forward(Method::GET, "/bookings", Some(user_id)).await,
    }
}

async fn list_owner_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Response> {
    match ensure_known_state(query.state)? {
        Some(state) => {
            client
                .forward_with_query(
                    Method::GET,
                    "/bookings/owner",
                    Some(user_id),
                    &[("state", state.as_str())],
                )
                .await
        }
        None => {
            client
                .forward(Method::GET, "/bookings/owner", Some(user_id))
                .await
        }
    }
}

async fn get_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> AppResult<Response> {
    client
        .forward(Method::GET, &format!("/bookings/{id}"), Some(user_id))
        .await
}

async fn decide_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    Query(query): Query<ApproveQuery>,
) -> AppResult<Response> {
    let path = format!("/bookings/{id}");
    client
        .forward_with_query(
            Method::PATCH,
            &path,
            Some(user_id),
            &[("approved", query.approved.to_string())],
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::SHARER_USER_ID_HEADER;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    // Rejections happen before forwarding, so no upstream is listening
    fn app() -> Router {
        router(ServerClient::new("http://127.0.0.1:1"))
    }

    fn booking_json(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> Value {
        json!({
            "item_id": Uuid::now_v7(),
            "start_date": start.to_rfc3339(),
            "end_date": end.to_rfc3339(),
        })
    }

    async fn post_booking(body: Value) -> axum::response::Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(SHARER_USER_ID_HEADER, Uuid::now_v7().to_string())
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[test]
    fn test_ensure_known_state_accepts_labels() {
        for label in ["ALL", "CURRENT", "FUTURE", "PAST", "WAITING", "REJECTED"] {
            assert!(ensure_known_state(Some(label.to_string())).is_ok());
        }
        assert!(ensure_known_state(None).unwrap().is_none());
    }

    #[test]
    fn test_ensure_known_state_rejects_unknown() {
        let result = ensure_known_state(Some("SOON".to_string()));
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_create_booking_past_start_rejected() {
        let response = post_booking(booking_json(
            Utc::now() - Duration::hours(1),
            Utc::now() + Duration::hours(1),
        ))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_create_booking_end_not_after_start_rejected() {
        let start = Utc::now() + Duration::hours(1);
        let response = post_booking(booking_json(start, start)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_booking_missing_timestamp_rejected() {
        let response = post_booking(json!({"item_id": Uuid::now_v7()})).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_state_rejected_without_forwarding() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/?state=SOON")
                    .header(SHARER_USER_ID_HEADER, Uuid::now_v7().to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "InvalidStateError");
        assert_eq!(body["message"], "Unknown state: SOON");
    }
}
