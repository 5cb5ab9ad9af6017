//! Elasticsearch-backed document store.
//!
//! Talks to the Elasticsearch document API over HTTP: one document per
//! canonical key, `GET /{index}/_doc/{id}` for lookups and
//! `PUT /{index}/_doc/{id}` for full-replace upserts. The index is
//! created at startup with `city` as an exact keyword, `timestamp` as a
//! date, and the weather payload stored un-indexed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;

use stratus_core::{CacheRecord, CanonicalKey};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::DocumentStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Elasticsearch document-store client.
///
/// Cheap to clone; the inner reqwest client is shared.
#[derive(Debug, Clone)]
pub struct EsStore {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    index: String,
}

/// Envelope returned by `GET /{index}/_doc/{id}`.
#[derive(Debug, Deserialize)]
struct GetDocResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<serde_json::Value>,
}

impl EsStore {
    /// Build a client from configuration.
    ///
    /// Returns `Ok(None)` when the store is not configured (missing
    /// endpoint or credential); the service then runs with the cache
    /// disabled.
    pub fn from_config(config: &StoreConfig) -> Result<Option<Self>, StoreError> {
        let (Some(endpoint), Some(api_key)) = (config.endpoint.clone(), config.api_key.clone())
        else {
            return Ok(None);
        };

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Some(Self {
            http,
            endpoint,
            api_key,
            index: config.index.clone(),
        }))
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.index)
    }

    fn doc_url(&self, key: &CanonicalKey) -> String {
        format!("{}/{}/_doc/{}", self.endpoint, self.index, key)
    }

    fn authorization(&self) -> String {
        format!("ApiKey {}", self.api_key)
    }
}

/// Drain an unexpected response into a [`StoreError`].
async fn unexpected_status(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StoreError::UnexpectedStatus { status, body }
}

#[async_trait]
impl DocumentStore for EsStore {
    fn backend(&self) -> &'static str {
        "elasticsearch"
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        let head = self
            .http
            .head(self.index_url())
            .header(header::AUTHORIZATION, self.authorization())
            .send()
            .await?;

        if head.status().is_success() {
            tracing::debug!(index = %self.index, "cache index already exists");
            return Ok(());
        }
        if head.status() != StatusCode::NOT_FOUND {
            return Err(unexpected_status(head).await);
        }

        let mappings = serde_json::json!({
            "mappings": {
                "properties": {
                    "city": { "type": "keyword" },
                    "timestamp": { "type": "date" },
                    "weather": { "type": "object", "enabled": false }
                }
            }
        });

        let response = self
            .http
            .put(self.index_url())
            .header(header::AUTHORIZATION, self.authorization())
            .json(&mappings)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        tracing::info!(index = %self.index, "created cache index");
        Ok(())
    }

    async fn get(&self, key: &CanonicalKey) -> Result<Option<CacheRecord>, StoreError> {
        let response = self
            .http
            .get(self.doc_url(key))
            .header(header::AUTHORIZATION, self.authorization())
            .send()
            .await?;

        // A missing document is a clean miss, not a fault.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        let envelope: GetDocResponse = response.json().await?;
        if !envelope.found {
            return Ok(None);
        }

        let source = envelope.source.ok_or_else(|| StoreError::MalformedDocument {
            reason: "document envelope missing _source".to_string(),
        })?;
        let record = serde_json::from_value(source)
            .map_err(|e| StoreError::MalformedDocument { reason: e.to_string() })?;
        Ok(Some(record))
    }

    async fn put(&self, key: &CanonicalKey, record: &CacheRecord) -> Result<(), StoreError> {
        let response = self
            .http
            .put(self.doc_url(key))
            .header(header::AUTHORIZATION, self.authorization())
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_store() -> EsStore {
        let config = StoreConfig {
            endpoint: Some("https://es.example.com:9200".to_string()),
            api_key: Some("secret".to_string()),
            index: "weather-cache".to_string(),
        };
        EsStore::from_config(&config).unwrap().unwrap()
    }

    #[test]
    fn unconfigured_store_builds_to_none() {
        let config = StoreConfig {
            endpoint: None,
            api_key: None,
            index: "weather-cache".to_string(),
        };
        assert!(EsStore::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn builds_document_urls_from_canonical_keys() {
        let store = test_store();
        let key = CanonicalKey::from_city("New York");
        assert_eq!(
            store.doc_url(&key),
            "https://es.example.com:9200/weather-cache/_doc/new-york"
        );
        assert_eq!(store.index_url(), "https://es.example.com:9200/weather-cache");
    }

    #[test]
    fn authorization_uses_the_api_key_scheme() {
        assert_eq!(test_store().authorization(), "ApiKey secret");
        assert_eq!(test_store().backend(), "elasticsearch");
    }

    #[test]
    fn decodes_a_found_envelope() {
        let envelope: GetDocResponse = serde_json::from_value(json!({
            "_index": "weather-cache",
            "_id": "new-york",
            "found": true,
            "_source": {
                "city": "New York",
                "weather": {"temp": 72},
                "timestamp": "2026-08-06T12:00:00Z"
            }
        }))
        .unwrap();

        assert!(envelope.found);
        let record: CacheRecord = serde_json::from_value(envelope.source.unwrap()).unwrap();
        assert_eq!(record.city, "New York");
        assert_eq!(record.weather, json!({"temp": 72}));
    }

    #[test]
    fn decodes_a_not_found_envelope() {
        let envelope: GetDocResponse = serde_json::from_value(json!({
            "_index": "weather-cache",
            "_id": "atlantis",
            "found": false
        }))
        .unwrap();

        assert!(!envelope.found);
        assert!(envelope.source.is_none());
    }
}
