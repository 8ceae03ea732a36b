use std::collections::BTreeMap;
use std::pin::Pin;

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the liveness endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

/// Body of the readiness endpoint, one entry per dependency probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: BTreeMap<String, bool>,
}

/// A named dependency probe resolving to (name, healthy)
pub type HealthCheckFuture = Pin<Box<dyn Future<Output = (String, bool)> + Send>>;

/// Run all probes concurrently and aggregate into a readiness body.
///
/// The overall status is "ok" only when every probe passed.
pub async fn run_health_checks(checks: Vec<HealthCheckFuture>) -> ReadyResponse {
    let results = join_all(checks).await;

    let all_healthy = results.iter().all(|(_, healthy)| *healthy);
    let checks: BTreeMap<String, bool> = results.into_iter().collect();

    ReadyResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        checks,
    }
}

async fn health_handler(State(info): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        name: info.name.to_string(),
        version: info.version.to_string(),
    })
}

/// Router exposing `GET /health` with the app's identity
pub fn health_router(info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(info)
}
