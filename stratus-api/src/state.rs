//! Shared application state for Axum routers.

use std::sync::Arc;

use stratus_store::DocumentStore;

/// Application-wide state shared across all routes.
///
/// The store handle is constructed once at startup and injected here;
/// `None` means the cache is disabled (missing endpoint or credential)
/// and every route degrades per its contract: checks answer
/// `cache_disabled`, writes answer 503.
#[derive(Clone)]
pub struct AppState {
    /// Document store behind the gateway, if configured.
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// Whether a store is wired in.
    pub fn cache_enabled(&self) -> bool {
        self.store.is_some()
    }
}
