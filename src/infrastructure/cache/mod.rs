//! Caching layer for fast alias lookups.
//!
//! Provides two [`crate::domain::repositories::LinkCache`] implementations:
//! - [`RedisLinkCache`] - Production Redis-backed cache
//! - [`MemoryLinkCache`] - Process-local TTL cache for deployments without Redis

mod memory_cache;
mod redis_cache;

pub use memory_cache::{DEFAULT_MEMORY_CACHE_CAPACITY, MemoryLinkCache};
pub use redis_cache::RedisLinkCache;
