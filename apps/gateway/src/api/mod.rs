//! Gateway route composition

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use axum::Router;

use crate::proxy::ServerClient;

pub fn routes(client: ServerClient) -> Router {
    Router::new()
        .nest("/users", users::router(client.clone()))
        .nest("/items", items::router(client.clone()))
        .nest("/bookings", bookings::router(client.clone()))
        .nest("/requests", requests::router(client))
}
