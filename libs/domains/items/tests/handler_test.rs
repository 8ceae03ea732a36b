use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::SHARER_USER_ID_HEADER;
use chrono::{Duration, Utc};
use domain_items::{InMemoryItemRepository, ItemService, SeededBooking, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> (Router, InMemoryItemRepository) {
    let repository = InMemoryItemRepository::new();
    let service = ItemService::new(repository.clone());
    (handlers::router(service), repository)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, sharer: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(SHARER_USER_ID_HEADER, sharer.to_string())
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn patch_json(uri: &str, sharer: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(SHARER_USER_ID_HEADER, sharer.to_string())
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_as(uri: &str, sharer: Uuid) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(SHARER_USER_ID_HEADER, sharer.to_string())
        .body(Body::empty())
        .unwrap()
}

async fn create_item(app: &Router, owner: Uuid, name: &str, available: bool) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            owner,
            json!({"name": name, "description": format!("{name} for lending"), "available": available}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_create_item_returns_201_with_body() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;

    let item = create_item(&app, owner, "Drill", true).await;

    assert_eq!(item["name"], "Drill");
    assert_eq!(item["owner_id"], owner.to_string());
    assert!(item["id"].is_string());
}

#[tokio::test]
async fn test_create_item_unknown_owner_returns_404() {
    let (app, _repo) = app();

    let response = app
        .oneshot(post_json(
            "/",
            Uuid::now_v7(),
            json!({"name": "Drill", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "NotFoundError");
}

#[tokio::test]
async fn test_create_item_missing_header_returns_400() {
    let (app, _repo) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"name": "Drill", "description": "Cordless", "available": true})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_create_item_blank_name_rejected() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;

    let response = app
        .oneshot(post_json(
            "/",
            owner,
            json!({"name": " ", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_unknown_request_returns_404() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;

    let response = app
        .oneshot(post_json(
            "/",
            owner,
            json!({
                "name": "Drill",
                "description": "Cordless",
                "available": true,
                "request_id": Uuid::now_v7(),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_by_non_owner_returns_404() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    let stranger = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    repo.seed_user(stranger, "Mallory").await;
    let item = create_item(&app, owner, "Drill", true).await;
    let id = item["id"].as_str().unwrap();

    let response = app
        .oneshot(patch_json(
            &format!("/{id}"),
            stranger,
            json!({"available": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_merges_absent_fields() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    let item = create_item(&app, owner, "Drill", true).await;
    let id = item["id"].as_str().unwrap();

    let response = app
        .oneshot(patch_json(
            &format!("/{id}"),
            owner,
            json!({"available": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Drill");
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn test_get_item_hides_bookings_from_non_owner() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    let viewer = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    repo.seed_user(viewer, "Bob").await;
    let item = create_item(&app, owner, "Drill", true).await;
    let id: Uuid = item["id"].as_str().unwrap().parse().unwrap();

    repo.seed_booking(SeededBooking {
        id: Uuid::now_v7(),
        item_id: id,
        booker_id: viewer,
        start_date: Utc::now() - Duration::days(7),
        end_date: Utc::now() - Duration::days(5),
        approved: true,
    })
    .await;

    let response = app
        .clone()
        .oneshot(get_as(&format!("/{id}"), owner))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["last_booking"].is_object());

    let response = app.oneshot(get_as(&format!("/{id}"), viewer)).await.unwrap();
    let body = json_body(response).await;
    assert!(body["last_booking"].is_null());
    assert!(body["next_booking"].is_null());
}

#[tokio::test]
async fn test_list_own_items_only() {
    let (app, repo) = app();
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();
    repo.seed_user(alice, "Alice").await;
    repo.seed_user(bob, "Bob").await;
    create_item(&app, alice, "Drill", true).await;
    create_item(&app, alice, "Saw", true).await;
    create_item(&app, bob, "Ladder", true).await;

    let response = app.oneshot(get_as("/", alice)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_without_header_is_open() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    create_item(&app, owner, "Power Drill", true).await;
    create_item(&app, owner, "Broken Drill", false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?text=dRiLl")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Power Drill");
}

#[tokio::test]
async fn test_search_blank_text_returns_empty() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    create_item(&app, owner, "Drill", true).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_without_completed_booking_rejected() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    let booker = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    repo.seed_user(booker, "Bob").await;
    let item = create_item(&app, owner, "Drill", true).await;
    let id = item["id"].as_str().unwrap();

    let response = app
        .oneshot(post_json(
            &format!("/{id}/comment"),
            booker,
            json!({"text": "Great drill"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "IneligibleForCommentError");
}

#[tokio::test]
async fn test_comment_after_completed_booking_returns_201() {
    let (app, repo) = app();
    let owner = Uuid::now_v7();
    let booker = Uuid::now_v7();
    repo.seed_user(owner, "Alice").await;
    repo.seed_user(booker, "Bob").await;
    let item = create_item(&app, owner, "Drill", true).await;
    let id: Uuid = item["id"].as_str().unwrap().parse().unwrap();

    repo.seed_booking(SeededBooking {
        id: Uuid::now_v7(),
        item_id: id,
        booker_id: booker,
        start_date: Utc::now() - Duration::days(7),
        end_date: Utc::now() - Duration::days(5),
        approved: true,
    })
    .await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/{id}/comment"),
            booker,
            json!({"text": "Great drill"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let comment = json_body(response).await;
    assert_eq!(comment["text"], "Great drill");
    assert_eq!(comment["author_name"], "Bob");

    let response = app.oneshot(get_as(&format!("/{id}"), owner)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
}
