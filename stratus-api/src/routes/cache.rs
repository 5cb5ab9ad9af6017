//! Cache Gateway Routes
//!
//! The decision layer that turns a raw stored record into one of
//! fresh-hit, stale-miss, not-found-miss, or error-miss. A check always
//! answers 200 with a cache-disposition payload; the write path is the
//! only one that surfaces hard errors, since a failed write has no
//! graceful degradation.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use stratus_core::{CacheRecord, CanonicalKey, Freshness};
use stratus_store::StoreError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Query parameters for `GET /api/cache/check`.
#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub city: String,
}

/// Why a check did not produce cached data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// Store not configured; no lookup was attempted.
    CacheDisabled,
    /// No document at the canonical key.
    NotFound,
    /// Document found but outside the TTL window.
    Expired,
    /// The lookup itself faulted; the caller should fetch fresh data.
    Error,
}

impl MissReason {
    /// Tag recorded as the span's miss-reason attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissReason::CacheDisabled => "cache_disabled",
            MissReason::NotFound => "not_found",
            MissReason::Expired => "expired",
            MissReason::Error => "error",
        }
    }
}

/// Response body for `GET /api/cache/check`. Always returned with 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub cached: bool,
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<MissReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<i64>,
}

impl CheckResponse {
    fn hit(data: serde_json::Value, age_seconds: i64) -> Self {
        Self {
            cached: true,
            data: Some(data),
            reason: None,
            age_seconds: Some(age_seconds),
        }
    }

    fn miss(reason: MissReason) -> Self {
        Self {
            cached: false,
            data: None,
            reason: Some(reason),
            age_seconds: None,
        }
    }

    fn expired(age_seconds: i64) -> Self {
        Self {
            cached: false,
            data: None,
            reason: Some(MissReason::Expired),
            age_seconds: Some(age_seconds),
        }
    }
}

/// Request body for `POST /api/cache/write`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    pub city: String,
    pub weather_data: serde_json::Value,
}

/// Response body for a successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub success: bool,
    pub city: String,
}

// ============================================================================
// DECISION LOGIC
// ============================================================================

/// Turn a raw store lookup into a cache disposition.
///
/// Outcomes are mutually exclusive: a clean negative lookup is
/// `not_found`, a record inside the TTL window is a hit, a record at or
/// past the boundary is `expired`, and any store fault is absorbed into
/// an `error` miss. Only [`StoreError`] is absorbed here; programming
/// errors are not masked.
fn classify(lookup: Result<Option<CacheRecord>, StoreError>, now: DateTime<Utc>) -> CheckResponse {
    match lookup {
        Ok(None) => CheckResponse::miss(MissReason::NotFound),
        Ok(Some(record)) => match Freshness::evaluate(record.timestamp, now) {
            Freshness::Fresh { age_seconds } => CheckResponse::hit(record.weather, age_seconds),
            Freshness::Expired { age_seconds } => CheckResponse::expired(age_seconds),
        },
        Err(_) => CheckResponse::miss(MissReason::Error),
    }
}

/// Annotate the current `cache.check` span with the outcome.
///
/// "Hit" on the span means the document was found, so an expired record
/// records as a hit with `cache.fresh = false`.
fn record_check_outcome(response: &CheckResponse, error_class: Option<&'static str>) {
    let span = tracing::Span::current();
    match (response.reason, response.age_seconds) {
        (None, Some(age)) => {
            span.record("cache.hit", true);
            span.record("cache.age_seconds", age);
            span.record("cache.fresh", true);
        }
        (Some(MissReason::Expired), Some(age)) => {
            span.record("cache.hit", true);
            span.record("cache.age_seconds", age);
            span.record("cache.fresh", false);
        }
        (Some(MissReason::Error), _) => {
            span.record("cache.hit", false);
            span.record("cache.error", error_class.unwrap_or("Unknown"));
        }
        (Some(reason), _) => {
            span.record("cache.hit", false);
            span.record("cache.miss_reason", reason.as_str());
        }
        (None, None) => {}
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/cache/check?city= - check for cached weather data.
///
/// Always answers 200; the body carries the disposition. Store faults
/// are logged and reported as an `error` miss, never as a request
/// failure - the caller can always fall back to fetching fresh data.
pub async fn check_cache(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CheckParams>,
) -> Json<CheckResponse> {
    let Some(store) = state.store.clone() else {
        return Json(CheckResponse::miss(MissReason::CacheDisabled));
    };

    let key = CanonicalKey::from_city(&params.city);
    let span = tracing::info_span!(
        "cache.check",
        cache.backend = store.backend(),
        cache.key = %key,
        cache.hit = tracing::field::Empty,
        cache.age_seconds = tracing::field::Empty,
        cache.fresh = tracing::field::Empty,
        cache.miss_reason = tracing::field::Empty,
        cache.error = tracing::field::Empty,
    );

    async move {
        let lookup = store.get(&key).await;
        let error_class = lookup.as_ref().err().map(StoreError::class);
        if let Err(err) = &lookup {
            tracing::warn!(key = %key, error = %err, "Cache check failed");
        }

        let response = classify(lookup, Utc::now());
        record_check_outcome(&response, error_class);

        match (response.cached, response.age_seconds) {
            (true, Some(age)) => {
                tracing::info!(key = %key, age_seconds = age, "Cache hit");
            }
            (false, Some(age)) => {
                tracing::info!(key = %key, age_seconds = age, "Cache expired");
            }
            // The error miss was already logged above at warn level.
            (false, None) if response.reason != Some(MissReason::Error) => {
                let reason = response.reason.map(|r| r.as_str()).unwrap_or("unknown");
                tracing::info!(key = %key, reason = reason, "Cache miss");
            }
            (false, None) => {}
            (true, None) => {}
        }

        Json(response)
    }
    .instrument(span)
    .await
}

/// POST /api/cache/write - upsert weather data for a city.
///
/// Fully replaces any existing document at the canonical key and stamps
/// the write time. 503 when the store is not configured, 500 when the
/// store rejects the write.
pub async fn write_cache(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WriteRequest>,
) -> ApiResult<Json<WriteResponse>> {
    let store = state.store.clone().ok_or_else(ApiError::cache_not_configured)?;

    let key = CanonicalKey::from_city(&req.city);
    let span = tracing::info_span!(
        "cache.write",
        cache.backend = store.backend(),
        cache.key = %key,
        cache.write.success = tracing::field::Empty,
        cache.error = tracing::field::Empty,
    );

    async move {
        let record = CacheRecord::new(req.city.clone(), req.weather_data, Utc::now());

        match store.put(&key, &record).await {
            Ok(()) => {
                tracing::Span::current().record("cache.write.success", true);
                tracing::info!(key = %key, city = %req.city, "Cached weather data");
                Ok(Json(WriteResponse {
                    success: true,
                    city: req.city,
                }))
            }
            Err(err) => {
                let span = tracing::Span::current();
                span.record("cache.write.success", false);
                span.record("cache.error", tracing::field::display(&err));
                tracing::error!(key = %key, error = %err, "Cache write failed");
                Err(ApiError::cache_write_failed(err))
            }
        }
    }
    .instrument(span)
    .await
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the cache gateway router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/check", get(check_cache))
        .route("/write", post(write_cache))
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn record_aged(secs: i64, now: DateTime<Utc>) -> CacheRecord {
        CacheRecord::new("New York", json!({"temp": 72}), now - Duration::seconds(secs))
    }

    #[test]
    fn classifies_missing_document_as_not_found() {
        let response = classify(Ok(None), Utc::now());
        assert!(!response.cached);
        assert!(response.data.is_none());
        assert_eq!(response.reason, Some(MissReason::NotFound));
        assert_eq!(response.age_seconds, None);
    }

    #[test]
    fn classifies_fresh_record_as_hit_with_age() {
        let now = Utc::now();
        let response = classify(Ok(Some(record_aged(120, now))), now);
        assert!(response.cached);
        assert_eq!(response.data, Some(json!({"temp": 72})));
        assert_eq!(response.reason, None);
        assert_eq!(response.age_seconds, Some(120));
    }

    #[test]
    fn freshness_boundary_is_exclusive() {
        let now = Utc::now();

        let response = classify(Ok(Some(record_aged(3599, now))), now);
        assert!(response.cached);
        assert_eq!(response.age_seconds, Some(3599));

        let response = classify(Ok(Some(record_aged(3600, now))), now);
        assert!(!response.cached);
        assert_eq!(response.reason, Some(MissReason::Expired));
        assert_eq!(response.age_seconds, Some(3600));

        let response = classify(Ok(Some(record_aged(3601, now))), now);
        assert!(!response.cached);
        assert_eq!(response.reason, Some(MissReason::Expired));
        assert_eq!(response.age_seconds, Some(3601));
    }

    #[test]
    fn expired_record_returns_no_data() {
        let now = Utc::now();
        let response = classify(Ok(Some(record_aged(7200, now))), now);
        assert!(!response.cached);
        assert!(response.data.is_none());
        assert_eq!(response.age_seconds, Some(7200));
    }

    #[test]
    fn classifies_store_fault_as_error_miss() {
        let fault = StoreError::UnexpectedStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let response = classify(Err(fault), Utc::now());
        assert!(!response.cached);
        assert!(response.data.is_none());
        assert_eq!(response.reason, Some(MissReason::Error));
        assert_eq!(response.age_seconds, None);
    }

    #[test]
    fn hit_serializes_without_reason() {
        let response = CheckResponse::hit(json!({"temp": 72}), 5);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["cached"], true);
        assert_eq!(value["data"]["temp"], 72);
        assert_eq!(value["age_seconds"], 5);
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn miss_serializes_with_snake_case_reason() {
        let response = CheckResponse::miss(MissReason::CacheDisabled);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["cached"], false);
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["reason"], "cache_disabled");
        assert!(value.get("age_seconds").is_none());
    }

    #[test]
    fn expired_serializes_with_reason_and_age() {
        let response = CheckResponse::expired(4000);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["reason"], "expired");
        assert_eq!(value["age_seconds"], 4000);
    }

    #[test]
    fn write_request_accepts_arbitrary_payload_shapes() {
        let req: WriteRequest = serde_json::from_value(json!({
            "city": "New York",
            "weather_data": {"temp": 72, "hourly": [68, 70, 72]}
        }))
        .unwrap();
        assert_eq!(req.city, "New York");
        assert_eq!(req.weather_data["hourly"][2], 72);
    }
}
