use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS layer restricted to a comma-separated list of allowed origins
pub fn create_cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
}

/// Permissive CORS layer for development environments
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer_from_list() {
        let _layer = create_cors_layer("http://localhost:3000, http://localhost:8080");
    }

    #[test]
    fn test_create_permissive_cors_layer() {
        let _layer = create_permissive_cors_layer();
    }
}
