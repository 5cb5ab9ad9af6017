//! TTL freshness policy.
//!
//! Freshness is computed lazily at read time from the wall-clock delta
//! against a fixed window; nothing is ever deleted. A stale record costs
//! the caller one re-fetch, after which the next write replaces it.

use chrono::{DateTime, Utc};

/// Fixed time-to-live for cached documents, in seconds.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Outcome of evaluating a stored write time against the TTL window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Record is inside the TTL window.
    Fresh {
        /// Age in whole seconds at evaluation time.
        age_seconds: i64,
    },
    /// Record is at or past the TTL boundary.
    Expired {
        /// Age in whole seconds at evaluation time.
        age_seconds: i64,
    },
}

impl Freshness {
    /// Evaluate a record's write time against `now`.
    ///
    /// The age is the wall-clock delta truncated to whole seconds.
    /// `age < CACHE_TTL_SECS` is fresh; the boundary itself is expired.
    /// A timestamp in the future (clock skew between writers) yields a
    /// negative age, which is inside the window.
    pub fn evaluate(stored_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age_seconds = (now - stored_at).num_seconds();
        if age_seconds < CACHE_TTL_SECS {
            Self::Fresh { age_seconds }
        } else {
            Self::Expired { age_seconds }
        }
    }

    /// Age in whole seconds, regardless of outcome.
    pub fn age_seconds(&self) -> i64 {
        match *self {
            Self::Fresh { age_seconds } | Self::Expired { age_seconds } => age_seconds,
        }
    }

    /// True for [`Freshness::Fresh`].
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn zero_age_is_fresh() {
        let now = Utc::now();
        assert_eq!(Freshness::evaluate(now, now), Freshness::Fresh { age_seconds: 0 });
    }

    #[test]
    fn one_second_inside_the_window_is_fresh() {
        let now = Utc::now();
        let freshness = Freshness::evaluate(now - Duration::seconds(3599), now);
        assert_eq!(freshness, Freshness::Fresh { age_seconds: 3599 });
    }

    #[test]
    fn the_boundary_is_expired() {
        let now = Utc::now();
        let freshness = Freshness::evaluate(now - Duration::seconds(3600), now);
        assert_eq!(freshness, Freshness::Expired { age_seconds: 3600 });
    }

    #[test]
    fn one_second_past_the_window_is_expired() {
        let now = Utc::now();
        let freshness = Freshness::evaluate(now - Duration::seconds(3601), now);
        assert_eq!(freshness, Freshness::Expired { age_seconds: 3601 });
        assert!(!freshness.is_fresh());
        assert_eq!(freshness.age_seconds(), 3601);
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        let now = Utc::now();
        let freshness = Freshness::evaluate(now + Duration::seconds(30), now);
        assert!(freshness.is_fresh());
        assert_eq!(freshness.age_seconds(), -30);
    }

    #[test]
    fn sub_second_ages_truncate_to_whole_seconds() {
        let now = Utc::now();
        let freshness = Freshness::evaluate(now - Duration::milliseconds(1500), now);
        assert_eq!(freshness.age_seconds(), 1);
    }
}
