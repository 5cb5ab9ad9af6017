//! Stratus Store - document-store abstraction and clients.
//!
//! The gateway talks to storage only through the [`DocumentStore`]
//! trait: get-by-key, full-replace upsert, and idempotent index
//! creation. [`EsStore`] is the production Elasticsearch implementation;
//! [`MemoryStore`] backs tests and local development.

pub mod config;
pub mod error;
pub mod es;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use es::EsStore;
pub use store::{DocumentStore, MemoryStore};
