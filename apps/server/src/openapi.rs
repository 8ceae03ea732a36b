use utoipa::OpenApi;

/// Combined OpenAPI document for the ShareIt server
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt Server API",
        version = "0.1.0",
        description = "Business tier for sharing items: users, items, bookings and requests"
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/items", api = domain_items::ApiDoc),
        (path = "/bookings", api = domain_bookings::ApiDoc),
        (path = "/requests", api = domain_requests::ApiDoc)
    )
)]
pub struct ApiDoc;
