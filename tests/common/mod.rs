#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shortlink::application::services::{RedirectService, ShortenPolicy, ShortenService};
use shortlink::infrastructure::cache::MemoryLinkCache;
use shortlink::infrastructure::persistence::PgLinkStore;
use shortlink::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://short.test";

pub async fn create_test_store(pool: PgPool) -> Arc<PgLinkStore> {
    Arc::new(PgLinkStore::new(Arc::new(pool)).await.unwrap())
}

pub async fn insert_link(pool: &PgPool, alias: &str, original: &str) {
    insert_link_at(pool, alias, original, Utc::now()).await;
}

pub async fn insert_link_at(pool: &PgPool, alias: &str, original: &str, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO url (alias, original, created_date) VALUES ($1, $2, $3)")
        .bind(alias)
        .bind(original)
        .bind(at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows_for(pool: &PgPool, original: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url WHERE original = $1")
        .bind(original)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_state(pool: PgPool) -> AppState {
    let store = create_test_store(pool).await;
    let cache = Arc::new(MemoryLinkCache::new(Duration::from_secs(3600)));
    create_test_state_from(store, cache)
}

pub fn create_test_state_from(store: Arc<PgLinkStore>, cache: Arc<MemoryLinkCache>) -> AppState {
    let policy = ShortenPolicy::default();

    AppState {
        redirect_service: Arc::new(RedirectService::new(
            cache.clone(),
            store.clone(),
            policy.request_timeout,
        )),
        shorten_service: Arc::new(ShortenService::new(cache.clone(), store.clone(), policy)),
        store_probe: store,
        cache_probe: cache,
        base_url: TEST_BASE_URL.to_string(),
        probe_timeout: Duration::from_secs(2),
    }
}
