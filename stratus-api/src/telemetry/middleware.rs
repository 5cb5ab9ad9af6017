//! Axum Middleware for HTTP Request Tracing
//!
//! Wraps every request in a server-kind span, joining the caller's
//! trace via the W3C traceparent/tracestate headers when present.

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use opentelemetry::{global, Context};
use opentelemetry_http::HeaderExtractor;
use std::time::Instant;
use tracing::{info_span, Instrument};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Extract trace context from incoming request headers.
///
/// Looks for the W3C traceparent/tracestate pair.
fn extract_trace_context(headers: &HeaderMap) -> Context {
    global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(headers)))
}

/// Observability middleware for Axum.
///
/// This middleware wraps every request with:
/// 1. A server span parented on the extracted trace context
/// 2. Response status recording
/// 3. Request completion logging
///
/// Span emission is best-effort; a sampler or exporter dropping the
/// span never affects the response.
pub async fn observability_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let parent_context = extract_trace_context(request.headers());

    let span = info_span!(
        "http_request",
        otel.name = %format!("{} {}", method, path),
        otel.kind = "server",
        otel.status_code = tracing::field::Empty,
        http.method = %method,
        http.target = %path,
        http.status_code = tracing::field::Empty,
    );
    span.set_parent(parent_context);

    let response = next.run(request).instrument(span.clone()).await;

    let duration = start.elapsed();
    let status = response.status();

    span.record("http.status_code", status.as_u16() as i64);
    if status.is_server_error() || status.is_client_error() {
        span.record("otel.status_code", "ERROR");
    } else {
        span.record("otel.status_code", "OK");
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = duration.as_millis() as u64,
        "Request completed"
    );

    response
}
