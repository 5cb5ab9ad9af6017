//! Canonical cache keys derived from city display names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier derived from a city display name.
///
/// The derivation is deterministic: lowercase with spaces replaced by
/// hyphens. Two display strings differing only in case or
/// space-vs-hyphen spelling map to the same key and therefore the same
/// document; the last write wins.
///
/// The private field means a key can only be obtained through
/// [`CanonicalKey::from_city`], so an un-normalized identifier can never
/// reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Derive the canonical key for a city display name.
    ///
    /// An empty or whitespace-only input is passed through like any
    /// other value; it derives a key that was never written, so lookups
    /// report not-found rather than an input error.
    pub fn from_city(city: &str) -> Self {
        Self(city.to_lowercase().replace(' ', "-"))
    }

    /// The key as a string slice, suitable for use as a document id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derives_lowercase_hyphenated() {
        assert_eq!(CanonicalKey::from_city("New York").as_str(), "new-york");
        assert_eq!(CanonicalKey::from_city("LONDON").as_str(), "london");
        assert_eq!(CanonicalKey::from_city("rio de janeiro").as_str(), "rio-de-janeiro");
    }

    #[test]
    fn case_and_spacing_collide() {
        assert_eq!(
            CanonicalKey::from_city("new york"),
            CanonicalKey::from_city("New York")
        );
        // Natively hyphenated names collide with their spaced spelling.
        assert_eq!(
            CanonicalKey::from_city("Winston-Salem"),
            CanonicalKey::from_city("Winston Salem")
        );
    }

    #[test]
    fn empty_city_derives_empty_key() {
        assert_eq!(CanonicalKey::from_city("").as_str(), "");
    }

    proptest! {
        #[test]
        fn derivation_is_idempotent(city in "[ -~]{0,64}") {
            let key = CanonicalKey::from_city(&city);
            prop_assert_eq!(CanonicalKey::from_city(key.as_str()), key.clone());
        }

        #[test]
        fn case_variants_share_a_key(city in "[ a-zA-Z-]{0,32}") {
            prop_assert_eq!(
                CanonicalKey::from_city(&city.to_uppercase()),
                CanonicalKey::from_city(&city.to_lowercase())
            );
        }
    }
}
