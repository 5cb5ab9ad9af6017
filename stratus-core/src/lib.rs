//! Stratus Core - domain types for the weather cache.
//!
//! Everything here is pure data and policy: canonical key derivation,
//! the persisted document shape, and the TTL freshness evaluation.
//! No I/O lives in this crate.

pub mod freshness;
pub mod key;
pub mod record;

pub use freshness::{Freshness, CACHE_TTL_SECS};
pub use key::CanonicalKey;
pub use record::CacheRecord;
