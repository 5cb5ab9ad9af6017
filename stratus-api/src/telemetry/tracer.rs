//! OpenTelemetry Tracer Initialization
//!
//! Sets up OTLP exporter for distributed tracing compatible with:
//! - Jaeger
//! - Grafana Tempo
//! - Any OTLP-compatible backend

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// OTLP endpoint for traces (e.g., "http://otel-collector:4318/v1/traces")
    pub otlp_endpoint: Option<String>,
    /// Service name for traces
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Trace sampling rate (0.0 to 1.0)
    pub trace_sample_rate: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TelemetryConfig {
    /// Read configuration from the environment.
    ///
    /// Environment variables:
    /// - `STRATUS_OTLP_ENDPOINT`: OTLP trace endpoint (unset = no export)
    /// - `STRATUS_SERVICE_NAME`: service name (default: "stratus-api")
    /// - `STRATUS_SERVICE_VERSION`: service version (default: crate version)
    /// - `STRATUS_ENVIRONMENT`: deployment environment (default: "development")
    /// - `STRATUS_TRACE_SAMPLE_RATE`: 0.0 to 1.0 (default: 1.0)
    pub fn from_env() -> Self {
        Self {
            otlp_endpoint: std::env::var("STRATUS_OTLP_ENDPOINT").ok(),
            service_name: std::env::var("STRATUS_SERVICE_NAME")
                .unwrap_or_else(|_| "stratus-api".to_string()),
            service_version: std::env::var("STRATUS_SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            environment: std::env::var("STRATUS_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            trace_sample_rate: std::env::var("STRATUS_TRACE_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        }
    }
}

/// Initialize the OpenTelemetry tracer and tracing subscriber.
///
/// This function should be called once at application startup before any
/// tracing occurs. It sets up:
/// - OTLP exporter for distributed traces (if endpoint configured)
/// - TraceContext propagation (W3C traceparent/tracestate headers)
/// - tracing-subscriber with OpenTelemetry layer
pub fn init_tracer(config: &TelemetryConfig) -> ApiResult<()> {
    // W3C TraceContext propagation: inbound trace headers join the
    // caller's trace.
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", config.service_version.clone()),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ]);

    let sampler = if config.trace_sample_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if config.trace_sample_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(config.trace_sample_rate)
    };

    let tracer_provider = if let Some(endpoint) = &config.otlp_endpoint {
        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| {
                ApiError::internal_error(format!("Failed to create OTLP exporter: {}", e))
            })?;

        TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_sampler(sampler)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build()
    } else {
        // No OTLP endpoint - spans still feed local logging.
        TracerProvider::builder()
            .with_sampler(sampler)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build()
    };

    let tracer = tracer_provider.tracer("stratus-api");
    global::set_tracer_provider(tracer_provider);

    let otel_layer = OpenTelemetryLayer::new(tracer);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stratus_api=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .try_init()
        .map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        environment = config.environment,
        otlp_endpoint = ?config.otlp_endpoint,
        "Telemetry initialized"
    );

    Ok(())
}

/// Gracefully shutdown the tracer provider, flushing pending spans.
///
/// Should be called before application exit.
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
    tracing::info!("Tracer shutdown complete");
}
