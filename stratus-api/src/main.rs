//! Stratus API Server Entry Point
//!
//! Bootstraps telemetry, the Elasticsearch store client, and the Axum
//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use stratus_api::telemetry::{init_tracer, shutdown_tracer, TelemetryConfig};
use stratus_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use stratus_store::{DocumentStore, EsStore, StoreConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracer(&telemetry_config)?;

    let store_config = StoreConfig::from_env();
    let store = init_store(&store_config).await?;

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(AppState::new(store), &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Stratus cache gateway");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    shutdown_tracer();
    Ok(())
}

/// Build the store client, or run with the cache disabled when the
/// endpoint or credential is missing.
///
/// An index-creation failure at startup is logged but does not disable
/// the store: reads surface `error` misses until the store recovers.
async fn init_store(config: &StoreConfig) -> ApiResult<Option<Arc<dyn DocumentStore>>> {
    let client = EsStore::from_config(config)
        .map_err(|e| ApiError::internal_error(format!("Failed to create store client: {}", e)))?;

    let Some(client) = client else {
        tracing::warn!("Cache store not configured; check and write will degrade");
        return Ok(None);
    };

    tracing::info!(index = %config.index, "Cache store configured");
    if let Err(err) = client.ensure_index().await {
        tracing::warn!(error = %err, "Failed to check/create cache index");
    }

    let store: Arc<dyn DocumentStore> = Arc::new(client);
    Ok(Some(store))
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("STRATUS_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("STRATUS_PORT").ok())
        .unwrap_or_else(|| "8000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
