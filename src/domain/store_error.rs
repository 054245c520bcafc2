//! Failure taxonomy shared by every cache and store adapter.
//!
//! Adapters translate their backend's native errors into [`StoreError`] before
//! returning, so coordinators branch on meaning rather than on Redis or
//! PostgreSQL vocabulary. See [`crate::utils::backend_error`] for the
//! classification rules.

use thiserror::Error;

/// Result type returned by all adapter operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Closed set of adapter-boundary failure kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested key is absent (or expired, for the cache).
    #[error("record not found")]
    NotFound,

    /// Unique-key violation on insert.
    #[error("unique key violation")]
    Conflict,

    /// The client or pool has been shut down. Never retried.
    #[error("connection closed")]
    ConnectionClosed,

    /// The operation exceeded its deadline.
    #[error("operation timed out")]
    Timeout,

    /// Any other backend failure.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true for kinds that make the current attempt unrecoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }

    /// Returns true for connectivity kinds that may clear up on a later request.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Unavailable(_))
    }
}

impl From<tokio::time::error::Elapsed> for StoreError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_only_connection_closed_is_fatal() {
        assert!(StoreError::ConnectionClosed.is_fatal());
        assert!(!StoreError::Timeout.is_fatal());
        assert!(!StoreError::NotFound.is_fatal());
        assert!(!StoreError::Conflict.is_fatal());
        assert!(!StoreError::Unavailable("boom".to_string()).is_fatal());
    }

    #[test]
    fn test_transient_kinds() {
        assert!(StoreError::Timeout.is_transient());
        assert!(StoreError::Unavailable("io".to_string()).is_transient());
        assert!(!StoreError::ConnectionClosed.is_transient());
        assert!(!StoreError::Conflict.is_transient());
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_deadline_maps_to_timeout() {
        let elapsed = tokio::time::timeout(
            Duration::from_millis(10),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert_eq!(StoreError::from(elapsed), StoreError::Timeout);
    }

    #[test]
    fn test_display_includes_backend_message() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "backend unavailable: connection refused");
    }
}
