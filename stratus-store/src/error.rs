//! Store error taxonomy.
//!
//! A clean negative lookup is not an error; `DocumentStore::get`
//! reports it as `Ok(None)`. Everything here is an unexpected fault.

use thiserror::Error;

/// Faults raised by document-store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure talking to the store.
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a status the client does not expect.
    #[error("store returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A stored document could not be decoded (missing fields, malformed
    /// timestamp).
    #[error("malformed cache document: {reason}")]
    MalformedDocument { reason: String },

    /// A shared lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Short class name recorded as the span attribute on read errors.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Http(_) => "Http",
            Self::UnexpectedStatus { .. } => "UnexpectedStatus",
            Self::MalformedDocument { .. } => "MalformedDocument",
            Self::LockPoisoned => "LockPoisoned",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status_and_body() {
        let err = StoreError::UnexpectedStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("502"));
        assert!(message.contains("bad gateway"));
        assert_eq!(err.class(), "UnexpectedStatus");
    }

    #[test]
    fn malformed_document_names_the_reason() {
        let err = StoreError::MalformedDocument {
            reason: "invalid timestamp".to_string(),
        };
        assert!(err.to_string().contains("invalid timestamp"));
        assert_eq!(err.class(), "MalformedDocument");
    }
}
