//! Route composition for the server tier

use axum::{Json, Router, routing::get};
use axum_helpers::server::{HealthCheckFuture, ReadyResponse, run_health_checks};
use domain_bookings::{BookingService, PgBookingRepository};
use domain_items::{ItemService, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::{PgUserRepository, UserService};
use sea_orm::DatabaseConnection;

/// Compose the domain routers over a shared database connection
pub fn routes(db: &DatabaseConnection) -> Router {
    let users = domain_users::handlers::router(UserService::new(PgUserRepository::new(db.clone())));
    let items = domain_items::handlers::router(ItemService::new(PgItemRepository::new(db.clone())));
    let bookings =
        domain_bookings::handlers::router(BookingService::new(PgBookingRepository::new(db.clone())));
    let requests =
        domain_requests::handlers::router(RequestService::new(PgRequestRepository::new(db.clone())));

    Router::new()
        .nest("/users", users)
        .nest("/items", items)
        .nest("/bookings", bookings)
        .nest("/requests", requests)
}

async fn ready(db: DatabaseConnection) -> Json<ReadyResponse> {
    let checks: Vec<HealthCheckFuture> = vec![Box::pin(async move {
        let healthy = database::postgres::check_health(&db).await.is_ok();
        ("database".to_string(), healthy)
    })];

    Json(run_health_checks(checks).await)
}

/// Router exposing `GET /ready` with a database probe
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(move || ready(db)))
}
