//! Short link creation (write path).

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::repositories::{LinkCache, LinkStore};
use crate::domain::store_error::StoreError;
use crate::error::LinkError;
use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, generate_alias};

/// Tunables for alias creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenPolicy {
    /// Length of generated aliases.
    pub alias_length: usize,
    /// Insert attempts before giving up with [`LinkError::ExhaustedRetries`].
    pub max_attempts: usize,
    /// Deadline shared by every call made for one request.
    pub request_timeout: Duration,
}

impl Default for ShortenPolicy {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_attempts: 10,
            request_timeout: Duration::from_secs(3),
        }
    }
}

/// Service for creating short links.
///
/// Creation is idempotent: a URL that already has an alias gets the same alias
/// back and no new row is written. Two concurrent first-time creations of the
/// same URL can still both insert; lookups then return the oldest row.
pub struct ShortenService {
    cache: Arc<dyn LinkCache>,
    store: Arc<dyn LinkStore>,
    policy: ShortenPolicy,
}

impl ShortenService {
    /// Creates a new shorten service.
    pub fn new(cache: Arc<dyn LinkCache>, store: Arc<dyn LinkStore>, policy: ShortenPolicy) -> Self {
        Self {
            cache,
            store,
            policy,
        }
    }

    /// Returns the alias for `original`, creating one if needed.
    ///
    /// # Flow
    ///
    /// 1. Look up an existing alias for the URL and return it if found
    /// 2. Otherwise generate a candidate and insert it, regenerating on
    ///    `Conflict` up to `max_attempts` times
    /// 3. Warm the cache with the new pair before reporting success
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Backend`] if the lookup, an insert, or the cache
    /// write fails with anything other than `NotFound`/`Conflict`.
    /// Returns [`LinkError::ExhaustedRetries`] if every candidate collided.
    pub async fn shorten(&self, original: &str) -> Result<String, LinkError> {
        let deadline = Instant::now() + self.policy.request_timeout;

        match self.store.get_alias(original, deadline).await {
            Ok(alias) => {
                debug!("Existing alias {} for {}", alias, original);
                return Ok(alias);
            }
            Err(StoreError::NotFound) => {}
            Err(e) => {
                error!("Alias lookup failed for {}: {}", original, e);
                return Err(LinkError::backend("alias lookup", e));
            }
        }

        let alias = self.insert_unique(original, deadline).await?;

        self.cache
            .set(&alias, original, deadline)
            .await
            .map_err(|e| {
                error!("Failed to cache new alias {}: {}", alias, e);
                LinkError::backend("cache population", e)
            })?;

        info!("Created alias {} for {}", alias, original);
        Ok(alias)
    }

    /// Inserts a freshly generated alias, regenerating on collision.
    async fn insert_unique(&self, original: &str, deadline: Instant) -> Result<String, LinkError> {
        for attempt in 1..=self.policy.max_attempts {
            let alias = generate_alias(self.policy.alias_length);

            match self.store.insert(&alias, original, deadline).await {
                Ok(()) => return Ok(alias),
                Err(StoreError::Conflict) => {
                    warn!("Alias collision on {} (attempt {})", alias, attempt);
                }
                Err(e) => {
                    error!("Insert failed for {}: {}", original, e);
                    return Err(LinkError::backend("insert", e));
                }
            }
        }

        Err(LinkError::ExhaustedRetries {
            attempts: self.policy.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkCache, MockLinkStore};
    use std::sync::Mutex;

    fn service(cache: MockLinkCache, store: MockLinkStore) -> ShortenService {
        ShortenService::new(Arc::new(cache), Arc::new(store), ShortenPolicy::default())
    }

    fn is_valid_alias(alias: &str) -> bool {
        alias.len() == 10 && alias.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[tokio::test]
    async fn test_shorten_new_url() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .withf(|original, _| original == "https://example.com/a")
            .times(1)
            .returning(|_, _| Err(StoreError::NotFound));
        store
            .expect_insert()
            .withf(|alias, original, _| is_valid_alias(alias) && original == "https://example.com/a")
            .times(1)
            .returning(|_, _, _| Ok(()));
        cache
            .expect_set()
            .withf(|key, value, _| is_valid_alias(key) && value == "https://example.com/a")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let alias = service(cache, store)
            .shorten("https://example.com/a")
            .await
            .unwrap();

        assert!(is_valid_alias(&alias));
    }

    #[tokio::test]
    async fn test_shorten_existing_url_is_idempotent() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .times(1)
            .returning(|_, _| Ok("existingAB".to_string()));
        store.expect_insert().times(0);
        cache.expect_set().times(0);

        let alias = service(cache, store)
            .shorten("https://example.com/a")
            .await
            .unwrap();

        assert_eq!(alias, "existingAB");
    }

    #[tokio::test]
    async fn test_collisions_retry_until_success() {
        const COLLISIONS: usize = 3;

        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        let attempted = Arc::new(Mutex::new(Vec::new()));
        let attempted_clone = attempted.clone();

        store
            .expect_get_alias()
            .returning(|_, _| Err(StoreError::NotFound));
        store
            .expect_insert()
            .times(COLLISIONS + 1)
            .returning(move |alias, _, _| {
                let mut seen = attempted_clone.lock().unwrap();
                seen.push(alias.to_string());
                if seen.len() <= COLLISIONS {
                    Err(StoreError::Conflict)
                } else {
                    Ok(())
                }
            });
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        let alias = service(cache, store)
            .shorten("https://example.com/a")
            .await
            .unwrap();

        let attempted = attempted.lock().unwrap();
        assert_eq!(attempted.len(), COLLISIONS + 1);
        assert_eq!(attempted.last(), Some(&alias));
    }

    #[tokio::test]
    async fn test_collisions_exhaust_retries() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .returning(|_, _| Err(StoreError::NotFound));
        store
            .expect_insert()
            .times(4)
            .returning(|_, _, _| Err(StoreError::Conflict));
        cache.expect_set().times(0);

        let policy = ShortenPolicy {
            max_attempts: 4,
            ..ShortenPolicy::default()
        };
        let service = ShortenService::new(Arc::new(cache), Arc::new(store), policy);

        let result = service.shorten("https://example.com/a").await;

        assert!(matches!(
            result,
            Err(LinkError::ExhaustedRetries { attempts: 4 })
        ));
    }

    #[tokio::test]
    async fn test_lookup_connection_closed_aborts_before_insert() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .times(1)
            .returning(|_, _| Err(StoreError::ConnectionClosed));
        store.expect_insert().times(0);
        cache.expect_set().times(0);

        let result = service(cache, store).shorten("https://example.com/a").await;

        assert!(matches!(
            result,
            Err(LinkError::Backend {
                source: StoreError::ConnectionClosed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_insert_fatal_kinds_are_not_retried() {
        for failure in [
            StoreError::ConnectionClosed,
            StoreError::Timeout,
            StoreError::Unavailable("io".to_string()),
        ] {
            let mut cache = MockLinkCache::new();
            let mut store = MockLinkStore::new();

            store
                .expect_get_alias()
                .returning(|_, _| Err(StoreError::NotFound));
            let expected = failure.clone();
            store
                .expect_insert()
                .times(1)
                .returning(move |_, _, _| Err(failure.clone()));
            cache.expect_set().times(0);

            let result = service(cache, store).shorten("https://example.com/a").await;

            match result {
                Err(LinkError::Backend { source, .. }) => assert_eq!(source, expected),
                other => panic!("expected backend failure, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_cache_population_failure_fails_creation() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .returning(|_, _| Err(StoreError::NotFound));
        store.expect_insert().times(1).returning(|_, _, _| Ok(()));
        cache
            .expect_set()
            .times(1)
            .returning(|_, _, _| Err(StoreError::Timeout));

        let result = service(cache, store).shorten("https://example.com/a").await;

        assert!(matches!(
            result,
            Err(LinkError::Backend {
                operation: "cache population",
                source: StoreError::Timeout,
            })
        ));
    }

    #[tokio::test]
    async fn test_custom_alias_length() {
        let mut cache = MockLinkCache::new();
        let mut store = MockLinkStore::new();

        store
            .expect_get_alias()
            .returning(|_, _| Err(StoreError::NotFound));
        store
            .expect_insert()
            .withf(|alias, _, _| alias.len() == 16)
            .times(1)
            .returning(|_, _, _| Ok(()));
        cache.expect_set().returning(|_, _, _| Ok(()));

        let policy = ShortenPolicy {
            alias_length: 16,
            ..ShortenPolicy::default()
        };
        let service = ShortenService::new(Arc::new(cache), Arc::new(store), policy);

        let alias = service.shorten("https://example.com/a").await.unwrap();
        assert_eq!(alias.len(), 16);
    }
}
