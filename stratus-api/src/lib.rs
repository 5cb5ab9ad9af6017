//! Stratus API - the HTTP cache gateway.
//!
//! A thin read-through cache service fronting an external weather data
//! provider. The gateway derives canonical document keys, applies the
//! TTL freshness policy against an injected document store, and shapes
//! the check/write/health surface. W3C trace context from inbound
//! requests is propagated onto every span.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;
