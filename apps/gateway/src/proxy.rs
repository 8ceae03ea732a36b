//! Forwarding client for the server tier.
//!
//! Validated requests are relayed as-is; upstream status codes and JSON
//! bodies pass through unchanged so both tiers present the same contract.

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;
use axum_helpers::{AppError, SHARER_USER_ID_HEADER};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone)]
pub struct ServerClient {
    client: Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str, sharer: Option<Uuid>) -> RequestBuilder {
        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(user_id) = sharer {
            request = request.header(SHARER_USER_ID_HEADER, user_id.to_string());
        }
        request
    }

    /// Relay a bodyless request
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        sharer: Option<Uuid>,
    ) -> Result<Response, AppError> {
        Self::relay(self.request(method, path, sharer)).await
    }

    /// Relay a request with a JSON body
    pub async fn forward_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        sharer: Option<Uuid>,
        body: &B,
    ) -> Result<Response, AppError> {
        Self::relay(self.request(method, path, sharer).json(body)).await
    }

    /// Relay a request with query parameters
    pub async fn forward_with_query<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        sharer: Option<Uuid>,
        query: &Q,
    ) -> Result<Response, AppError> {
        Self::relay(self.request(method, path, sharer).query(query)).await
    }

    async fn relay(request: RequestBuilder) -> Result<Response, AppError> {
        let upstream = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Upstream request failed: {e}")))?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .map_err(|e| AppError::Internal(format!("Upstream returned invalid status: {e}")))?;

        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| AppError::Internal(format!("Upstream body read failed: {e}")))?;

        let mut builder = Response::builder().status(status);
        if !bytes.is_empty() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        builder
            .body(Body::from(bytes))
            .map_err(|e| AppError::Internal(format!("Response assembly failed: {e}")))
    }
}
