//! Store configuration from environment variables.

/// Elasticsearch connection settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store endpoint URL. `None` disables the cache entirely.
    pub endpoint: Option<String>,
    /// API key credential. `None` disables the cache entirely.
    pub api_key: Option<String>,
    /// Index holding cache documents.
    pub index: String,
}

impl StoreConfig {
    /// Read configuration from the environment.
    ///
    /// Environment variables:
    /// - `STRATUS_ES_ENDPOINT`: store URL, normalized (see [`normalize_endpoint`])
    /// - `STRATUS_ES_API_KEY`: API key credential
    /// - `STRATUS_CACHE_INDEX`: index name (default: "weather-cache")
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("STRATUS_ES_ENDPOINT")
                .ok()
                .map(|e| normalize_endpoint(&e))
                .filter(|e| !e.is_empty()),
            api_key: std::env::var("STRATUS_ES_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            index: std::env::var("STRATUS_CACHE_INDEX")
                .unwrap_or_else(|_| "weather-cache".to_string()),
        }
    }

    /// Whether both endpoint and credential are present.
    ///
    /// When false, the store integration is disabled entirely: checks
    /// degrade to a `cache_disabled` miss and writes fail with 503.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

/// Strip trailing slashes and repair the `"/:443"` / `"/:9200"` suffixes
/// that deployment templating occasionally produces in endpoint URLs.
pub fn normalize_endpoint(raw: &str) -> String {
    raw.trim_end_matches('/')
        .replace("/:443", ":443")
        .replace("/:9200", ":9200")
}
