//! Volatile cache contract for alias lookups.

use crate::domain::store_error::StoreResult;
use async_trait::async_trait;
use tokio::time::Instant;

/// Non-authoritative alias → original URL cache.
///
/// Entries expire a fixed TTL after they are written. An expired entry is
/// indistinguishable from one that was never cached.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisLinkCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryLinkCache`] - In-process cache for
///   deployments without Redis
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkCache: Send + Sync {
    /// Returns the cached URL for `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on a miss or expired entry; `ConnectionClosed`,
    /// `Timeout` or `Unavailable` on backend failure.
    async fn get(&self, key: &str, deadline: Instant) -> StoreResult<String>;

    /// Writes `key → value` with the cache TTL, replacing any prior value.
    async fn set(&self, key: &str, value: &str, deadline: Instant) -> StoreResult<()>;

    /// Releases the underlying connection.
    ///
    /// A second call, and any operation issued afterwards, returns
    /// `ConnectionClosed`.
    async fn close(&self) -> StoreResult<()>;
}
