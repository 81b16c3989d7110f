//! CORS layer configuration.

use std::time::Duration;

use axum::http::header::{ACCEPT, CONTENT_TYPE, HeaderName};
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

use momentos_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Session cookies need credentialed requests, which rule out wildcard
/// origins, so every origin is listed explicitly.
pub fn build_cors_layer(config: &CorsConfig, csrf_header: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let mut headers = vec![CONTENT_TYPE, ACCEPT];
    if let Ok(name) = HeaderName::try_from(csrf_header) {
        headers.push(name);
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
