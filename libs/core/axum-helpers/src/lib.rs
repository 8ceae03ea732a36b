//! Shared axum building blocks: the application error type, request
//! extractors, HTTP middleware and server assembly helpers.

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, AppResult, ErrorResponse};
pub use extractors::{SHARER_USER_ID_HEADER, SharerId, UuidPath, ValidatedJson};
pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_app,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};
