//! Durable store contract for alias records.

use crate::domain::store_error::StoreResult;
use async_trait::async_trait;
use tokio::time::Instant;

/// Authoritative storage of alias → original URL records.
///
/// Every call is bounded by `deadline`; an expired deadline surfaces
/// [`crate::domain::store_error::StoreError::Timeout`]. Implementations never
/// retry internally.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Looks up the original URL for an alias.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matches, `ConnectionClosed` once the
    /// pool has been shut down, `Timeout`/`Unavailable` on other failures.
    async fn get_original(&self, alias: &str, deadline: Instant) -> StoreResult<String>;

    /// Looks up the alias already assigned to an original URL.
    ///
    /// Used to make creation idempotent. Same failure kinds as
    /// [`LinkStore::get_original`].
    async fn get_alias(&self, original: &str, deadline: Instant) -> StoreResult<String>;

    /// Inserts a new record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the alias is already taken.
    async fn insert(&self, alias: &str, original: &str, deadline: Instant) -> StoreResult<()>;

    /// Releases the connection pool.
    ///
    /// A second call, and any operation issued afterwards, returns
    /// `ConnectionClosed`.
    async fn close(&self) -> StoreResult<()>;
}
