//! API configuration.
//!
//! Configuration is loaded from environment variables once at startup,
//! with defaults suitable for local development.

/// CORS settings for the HTTP surface.
///
/// The browser frontend is a single known origin making credentialed
/// requests, so exactly one origin is allowed.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The single allowed cross-origin caller.
    pub cors_origin: String,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origin: "http://localhost:1234".to_string(),
            cors_max_age_secs: 86400, // 24 hours
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `STRATUS_CORS_ORIGIN`: allowed origin (default: http://localhost:1234)
    /// - `STRATUS_CORS_MAX_AGE_SECS`: preflight cache duration (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origin = std::env::var("STRATUS_CORS_ORIGIN")
            .ok()
            .filter(|o| !o.is_empty())
            .unwrap_or(defaults.cors_origin);

        let cors_max_age_secs = std::env::var("STRATUS_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        Self {
            cors_origin,
            cors_max_age_secs,
        }
    }
}
