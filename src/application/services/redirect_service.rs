//! Alias resolution (cache-aside read path).

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::domain::repositories::{LinkCache, LinkStore};
use crate::domain::store_error::StoreError;
use crate::error::LinkError;

/// Resolves aliases to their original URLs.
///
/// # Cache Strategy
///
/// - **Cache hit**: Return immediately, no store access
/// - **Cache miss**: Query the store, repopulate the cache, return
/// - **Cache error**: Treated as a miss; logged at `warn`
///
/// A failed repopulation is logged and never fails the resolution. Each call
/// makes at most one cache read, one store read and one cache write, all
/// under a single request deadline, with no retries.
pub struct RedirectService {
    cache: Arc<dyn LinkCache>,
    store: Arc<dyn LinkStore>,
    request_timeout: Duration,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        cache: Arc<dyn LinkCache>,
        store: Arc<dyn LinkStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            request_timeout,
        }
    }

    /// Resolves `alias` to the original URL.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if the store has no such alias.
    /// Returns [`LinkError::Backend`] if the store lookup fails for any other
    /// reason.
    pub async fn resolve(&self, alias: &str) -> Result<String, LinkError> {
        let deadline = Instant::now() + self.request_timeout;

        match self.cache.get(alias, deadline).await {
            Ok(original) => {
                debug!("Cache HIT for {}", alias);
                return Ok(original);
            }
            Err(StoreError::NotFound) => debug!("Cache MISS for {}", alias),
            Err(e) => warn!("Cache read failed for {}, falling back to store: {}", alias, e),
        }

        let original = match self.store.get_original(alias, deadline).await {
            Ok(original) => original,
            Err(StoreError::NotFound) => return Err(LinkError::NotFound),
            Err(e) => {
                error!("Store lookup failed for {}: {}", alias, e);
                return Err(LinkError::backend("resolve", e));
            }
        };

        if let Err(e) = self.cache.set(alias, &original, deadline).await {
            warn!("Failed to repopulate cache for {}: {}", alias, e);
        }

        Ok(original)
    }
}
