//! Redis-backed cache implementation.

use crate::domain::repositories::{HealthProbe, LinkCache};
use crate::domain::store_error::{StoreError, StoreResult};
use crate::utils::backend_error::classify_redis_error;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// Redis cache for alias lookups.
///
/// Keys are bare aliases and values are the original URLs as plain strings,
/// written with `SET ... EX ttl`. The `ConnectionManager` multiplexes one
/// connection across all request tasks and the liveness monitor and
/// reconnects on its own. Each call clones it out from under a read lock;
/// `close` takes it out, so the socket goes away once in-flight calls finish.
pub struct RedisLinkCache {
    client: RwLock<Option<ConnectionManager>>,
    ttl_seconds: u64,
}

impl RedisLinkCache {
    /// Connects to Redis, validates the connection with a PING, and configures the TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - Expiry applied to every entry (`CACHE_TTL_SECONDS`)
    /// - `max_retries` - Reconnect attempts made by the connection manager
    ///   (`REDIS_MAX_RETRIES`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64, max_retries: usize) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| classify_redis_error(&e))?;

        let config = ConnectionManagerConfig::new().set_number_of_retries(max_retries);
        let manager = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| classify_redis_error(&e))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| classify_redis_error(&e))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: RwLock::new(Some(manager)),
            ttl_seconds,
        })
    }

    /// Returns a handle to the shared connection, or `ConnectionClosed`.
    async fn connection(&self) -> StoreResult<ConnectionManager> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(StoreError::ConnectionClosed)
    }
}

#[async_trait]
impl LinkCache for RedisLinkCache {
    async fn get(&self, key: &str, deadline: Instant) -> StoreResult<String> {
        let mut conn = self.connection().await?;

        match timeout_at(deadline, conn.get::<_, Option<String>>(key)).await? {
            Ok(Some(url)) => {
                debug!("Cache HIT: {} -> {}", key, url);
                Ok(url)
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Err(StoreError::NotFound)
            }
            Err(e) => {
                warn!("Redis GET error for {}: {}", key, e);
                Err(classify_redis_error(&e))
            }
        }
    }

    async fn set(&self, key: &str, value: &str, deadline: Instant) -> StoreResult<()> {
        let mut conn = self.connection().await?;

        match timeout_at(deadline, conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds)).await? {
            Ok(()) => {
                debug!(
                    "Cache SET: {} -> {} (TTL: {}s)",
                    key, value, self.ttl_seconds
                );
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Err(classify_redis_error(&e))
            }
        }
    }

    async fn close(&self) -> StoreResult<()> {
        if self.client.write().await.take().is_none() {
            return Err(StoreError::ConnectionClosed);
        }
        info!("Redis cache closed");
        Ok(())
    }
}

#[async_trait]
impl HealthProbe for RedisLinkCache {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn ping(&self, deadline: Instant) -> StoreResult<()> {
        let mut conn = self.connection().await?;

        timeout_at(deadline, conn.ping::<()>())
            .await?
            .map_err(|e| classify_redis_error(&e))
    }
}
