use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, middleware, routing::get};
use core_config::{Environment, env_or_default, server::ServerConfig};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use crate::server::shutdown::{ShutdownCoordinator, shutdown_signal};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assemble the full application router from domain routes.
///
/// Adds the OpenAPI document endpoint, request tracing, timeouts, CORS,
/// security headers and the JSON not-found fallback. In production CORS is
/// restricted to `CORS_ALLOWED_ORIGINS`, in development it is permissive.
pub fn create_router<T: OpenApi + 'static>(api_router: Router, environment: &Environment) -> Router {
    let cors = if environment.is_production() {
        create_cors_layer(&env_or_default("CORS_ALLOWED_ORIGINS", ""))
    } else {
        create_permissive_cors_layer()
    };

    Router::new()
        .merge(api_router)
        .route("/api-docs/openapi.json", get(|| async { Json(T::openapi()) }))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(middleware::from_fn(security_headers))
        .fallback(not_found)
}

/// Bind and serve the router, shutting down on SIGINT/SIGTERM
pub async fn create_app(router: Router, config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Bind and serve the router under a shutdown coordinator.
///
/// A background task watches for OS signals and triggers the coordinator,
/// which also lets other tasks (cleanup loops, pollers) stop in concert
/// with the HTTP server.
pub async fn create_production_app(
    router: Router,
    config: &ServerConfig,
    coordinator: Arc<ShutdownCoordinator>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let signal_watcher = coordinator.clone();
    tokio::spawn(async move {
        signal_watcher.wait_for_signal().await;
    });

    let mut rx = coordinator.subscribe();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = rx.recv().await;
            tracing::info!("HTTP server draining connections");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test-api"))]
    struct TestApiDoc;

    #[tokio::test]
    async fn test_router_serves_openapi_document() {
        let app = create_router::<TestApiDoc>(Router::new(), &Environment::Development);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_unknown_route_returns_json_404() {
        let app = create_router::<TestApiDoc>(Router::new(), &Environment::Development);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_router_merges_api_routes() {
        let api = Router::new().route("/ping", get(|| async { "pong" }));
        let app = create_router::<TestApiDoc>(api, &Environment::Development);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
