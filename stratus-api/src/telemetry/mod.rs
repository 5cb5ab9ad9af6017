//! Observability infrastructure.
//!
//! OpenTelemetry tracing with OTLP export and per-request
//! instrumentation. Tracing is best-effort: a dropped span never
//! affects a handler's result.

pub mod middleware;
pub mod tracer;

pub use middleware::observability_middleware;
pub use tracer::{init_tracer, shutdown_tracer, TelemetryConfig};
