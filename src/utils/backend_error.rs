//! Classification of raw backend errors into [`StoreError`].
//!
//! No `sqlx` or `redis` error crosses an adapter boundary; adapters run every
//! failure through one of these functions first.

use crate::domain::store_error::StoreError;

/// Maps a PostgreSQL client error onto the shared taxonomy.
pub fn classify_sqlx_error(e: &sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict;
    }

    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::PoolClosed => StoreError::ConnectionClosed,
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        sqlx::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => StoreError::Timeout,
        other => StoreError::Unavailable(other.to_string()),
    }
}

/// Maps a Redis client error onto the shared taxonomy.
///
/// Redis has no notion of a closed client here; closed adapters are detected
/// by the adapter before the client is touched.
pub fn classify_redis_error(e: &redis::RedisError) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Unavailable(e.to_string())
    }
}
