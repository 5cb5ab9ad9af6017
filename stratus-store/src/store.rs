//! The gateway/store seam.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use stratus_core::{CacheRecord, CanonicalKey};

use crate::error::StoreError;

/// Get/upsert-by-key document storage.
///
/// The gateway holds an injected `Arc<dyn DocumentStore>`; durability
/// and concurrency control are entirely the implementation's concern.
/// [`put`](DocumentStore::put) fully replaces any existing document
/// (last write wins under concurrent writers), and
/// [`get`](DocumentStore::get) reports a clean negative lookup as
/// `Ok(None)` rather than an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend identifier recorded on cache spans.
    fn backend(&self) -> &'static str;

    /// Create the backing index if it does not exist. Idempotent;
    /// called once at startup.
    async fn ensure_index(&self) -> Result<(), StoreError>;

    /// Fetch the document at `key`, or `None` if it was never written.
    async fn get(&self, key: &CanonicalKey) -> Result<Option<CacheRecord>, StoreError>;

    /// Fully replace the document at `key`.
    async fn put(&self, key: &CanonicalKey, record: &CacheRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, CacheRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get(&self, key: &CanonicalKey) -> Result<Option<CacheRecord>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(documents.get(key.as_str()).cloned())
    }

    async fn put(&self, key: &CanonicalKey, record: &CacheRecord) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::LockPoisoned)?;
        documents.insert(key.as_str().to_string(), record.clone());
        Ok(())
    }
}
