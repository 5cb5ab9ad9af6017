//! HTTP routes for the Stratus cache gateway.
//!
//! - `GET /` - service banner
//! - `GET /health` - liveness + cache status
//! - `GET /api/cache/check`, `POST /api/cache/write` - the gateway surface
//!
//! CORS allows the one configured browser origin with credentials, and
//! exposes the W3C trace-context headers so cross-origin callers can
//! read them and correlate their traces with ours.

pub mod cache;
pub mod health;
pub mod service;

use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::telemetry::observability_middleware;

/// Create the complete API router.
///
/// # Middleware Order (outer to inner)
/// 1. CORS (outermost) - handles preflight requests
/// 2. Observability - tracing spans and completion logs
/// 3. Handlers
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let cors = build_cors_layer(config);

    Router::new()
        .route("/", get(service::root))
        .merge(health::create_router(state.clone()))
        .nest("/api/cache", cache::create_router(state))
        .layer(from_fn(observability_middleware))
        .layer(cors)
}

/// Build the CORS layer from ApiConfig.
///
/// A single origin with credentials permitted. Request methods and
/// headers are mirrored back (a wildcard cannot be combined with
/// credentials), and the trace-context headers are explicitly exposed
/// to the browser.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = match config.cors_origin.parse::<HeaderValue>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(
                origin = %config.cors_origin,
                "Invalid CORS origin, falling back to default"
            );
            HeaderValue::from_static("http://localhost:1234")
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([
            HeaderName::from_static("traceparent"),
            HeaderName::from_static("tracestate"),
        ])
        .max_age(Duration::from_secs(config.cors_max_age_secs))
}
