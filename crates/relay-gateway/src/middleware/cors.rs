//! CORS middleware.
//!
//! Browser peers post signaling messages cross-origin, so preflight requests
//! are answered here before they reach the relay handlers.

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

/// Create CORS layer from relay config
pub fn create_cors_layer(config: &CorsConfig) -> TowerCorsLayer {
    if !config.enabled {
        // Return permissive CORS that effectively disables it
        return TowerCorsLayer::very_permissive();
    }

    let mut cors = TowerCorsLayer::new().allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    // Configure origins
    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure headers
    if config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(Duration::from_secs(config.max_age))
}
