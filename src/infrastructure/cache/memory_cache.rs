//! In-process cache for deployments without Redis, backed by Moka.

use crate::domain::repositories::{HealthProbe, LinkCache};
use crate::domain::store_error::{StoreError, StoreResult};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, trace};

/// Default maximum number of cached aliases.
pub const DEFAULT_MEMORY_CACHE_CAPACITY: u64 = 10_000;

/// Bounded in-memory alias cache.
///
/// Used when Redis is not configured or unreachable at startup, and in tests.
/// Entries expire `ttl` after their last write. Moka evicts expired entries
/// during housekeeping even if they are never read again, and evicts the
/// least useful entries once `max_capacity` is reached.
pub struct MemoryLinkCache {
    entries: Cache<String, String>,
    closed: AtomicBool,
}

impl MemoryLinkCache {
    /// Creates a cache with the default capacity whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CACHE_CAPACITY, ttl)
    }

    /// Creates a cache holding at most `max_capacity` entries.
    pub fn with_capacity(max_capacity: u64, ttl: Duration) -> Self {
        debug!(
            "Using in-memory cache (capacity: {}, TTL: {}s)",
            max_capacity,
            ttl.as_secs()
        );
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            entries,
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::ConnectionClosed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LinkCache for MemoryLinkCache {
    async fn get(&self, key: &str, deadline: Instant) -> StoreResult<String> {
        self.ensure_open()?;

        match timeout_at(deadline, self.entries.get(key)).await? {
            Some(original) => {
                trace!("Memory cache HIT: {}", key);
                Ok(original)
            }
            None => {
                trace!("Memory cache MISS: {}", key);
                Err(StoreError::NotFound)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, deadline: Instant) -> StoreResult<()> {
        self.ensure_open()?;

        timeout_at(
            deadline,
            self.entries.insert(key.to_string(), value.to_string()),
        )
        .await?;
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::ConnectionClosed);
        }
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(())
    }
}

#[async_trait]
impl HealthProbe for MemoryLinkCache {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn ping(&self, _deadline: Instant) -> StoreResult<()> {
        self.ensure_open()
    }
}
