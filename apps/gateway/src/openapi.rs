use utoipa::OpenApi;

/// Combined OpenAPI document for the ShareIt gateway.
///
/// The gateway mirrors the server tier's surface, so the domain documents
/// are nested under the same paths.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt Gateway API",
        version = "0.1.0",
        description = "Validation and forwarding tier in front of the ShareIt server"
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/items", api = domain_items::ApiDoc),
        (path = "/bookings", api = domain_bookings::ApiDoc),
        (path = "/requests", api = domain_requests::ApiDoc)
    )
)]
pub struct ApiDoc;
