//! The persisted cache document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cached weather document.
///
/// `city` keeps the caller's original casing for display; the document
/// id is the [`CanonicalKey`](crate::CanonicalKey) derived from it.
/// `weather` is opaque: stored and returned as-is, never interpreted or
/// validated. `timestamp` is stamped by the gateway at write time;
/// callers never supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// City display name exactly as supplied by the caller.
    pub city: String,
    /// Opaque weather payload.
    pub weather: serde_json::Value,
    /// UTC time of the most recent successful write.
    pub timestamp: DateTime<Utc>,
}

impl CacheRecord {
    /// Build a record for a write, stamped with the given time.
    pub fn new(
        city: impl Into<String>,
        weather: serde_json::Value,
        stored_at: DateTime<Utc>,
    ) -> Self {
        Self {
            city: city.into(),
            weather,
            timestamp: stored_at,
        }
    }
}
