//! Reusable OpenAPI response documentation for error cases.
//!
//! Domain handlers reference these in `#[utoipa::path]` annotations so the
//! generated document shows consistent error bodies everywhere.

use serde_json::json;
use utoipa::ToResponse;

use super::ErrorResponse;

#[derive(ToResponse)]
#[response(
    description = "Request validation failed",
    content_type = "application/json",
    example = json!({
        "error": "ValidationError",
        "message": "email: must be a valid email address"
    })
)]
pub struct ValidationErrorResponse(#[allow(dead_code)] ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "NotFoundError",
        "message": "Item with id 019029ab-... not found"
    })
)]
pub struct NotFoundResponse(#[allow(dead_code)] ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource already exists",
    content_type = "application/json",
    example = json!({
        "error": "AlreadyExistsError",
        "message": "User with email alice@example.com already exists"
    })
)]
pub struct AlreadyExistsResponse(#[allow(dead_code)] ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Operation not allowed in the current state",
    content_type = "application/json",
    example = json!({
        "error": "InvalidStateError",
        "message": "Booking has already been approved or rejected"
    })
)]
pub struct InvalidStateResponse(#[allow(dead_code)] ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal server error",
    content_type = "application/json",
    example = json!({
        "error": "InternalError",
        "message": "An internal error occurred"
    })
)]
pub struct InternalErrorResponse(#[allow(dead_code)] ErrorResponse);
