//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::{HealthProbe, LinkStore};
use crate::domain::store_error::{StoreError, StoreResult};
use crate::utils::backend_error::classify_sqlx_error;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS url (
        alias VARCHAR PRIMARY KEY,
        original VARCHAR NOT NULL,
        created_date TIMESTAMPTZ NOT NULL
    )
"#;

const CREATE_ORIGINAL_INDEX: &str = "CREATE INDEX IF NOT EXISTS url_original_idx ON url (original)";

/// PostgreSQL store for alias records.
///
/// The pool is shared by every request task and the store liveness monitor;
/// `sqlx` handles concurrent use, so the adapter holds no locks of its own.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Wraps an existing pool and makes sure the `url` table exists.
    ///
    /// # Errors
    ///
    /// Returns the classified error if schema bootstrap fails.
    pub async fn new(pool: Arc<PgPool>) -> StoreResult<Self> {
        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    /// Opens a pool sized from `config` and bootstraps the schema.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the database is unreachable or schema
    /// bootstrap fails.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await
            .map_err(classify)?;

        info!("Connected to database");
        Self::new(Arc::new(pool)).await
    }

    /// Creates the table and its lookup index if absent. Idempotent.
    async fn bootstrap(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(self.pool.as_ref())
            .await
            .map_err(classify)?;

        sqlx::query(CREATE_ORIGINAL_INDEX)
            .execute(self.pool.as_ref())
            .await
            .map_err(classify)?;

        debug!("Schema bootstrap complete");
        Ok(())
    }
}

fn classify(e: sqlx::Error) -> StoreError {
    classify_sqlx_error(&e)
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn get_original(&self, alias: &str, deadline: Instant) -> StoreResult<String> {
        let query = sqlx::query_scalar::<_, String>("SELECT original FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_one(self.pool.as_ref());

        timeout_at(deadline, query).await?.map_err(|e| {
            let kind = classify(e);
            if kind.is_fatal() {
                error!("Unable to read alias {}: pool is closed", alias);
            }
            kind
        })
    }

    async fn get_alias(&self, original: &str, deadline: Instant) -> StoreResult<String> {
        // Oldest row wins if a creation race ever produced two aliases.
        let query = sqlx::query_scalar::<_, String>(
            "SELECT alias FROM url WHERE original = $1 ORDER BY created_date LIMIT 1",
        )
        .bind(original)
        .fetch_one(self.pool.as_ref());

        timeout_at(deadline, query).await?.map_err(|e| {
            let kind = classify(e);
            if kind.is_fatal() {
                error!("Unable to look up {}: pool is closed", original);
            }
            kind
        })
    }

    async fn insert(&self, alias: &str, original: &str, deadline: Instant) -> StoreResult<()> {
        let link = ShortLink::new(alias, original);

        let query = sqlx::query(
            "INSERT INTO url (alias, original, created_date) VALUES ($1, $2, $3)",
        )
        .bind(&link.alias)
        .bind(&link.original)
        .bind(link.created_at)
        .execute(self.pool.as_ref());

        match timeout_at(deadline, query).await? {
            Ok(_) => {
                debug!("Stored {} -> {}", link.alias, link.original);
                Ok(())
            }
            Err(e) => {
                let kind = classify(e);
                if kind.is_fatal() {
                    error!("Unable to insert {} {}: pool is closed", alias, original);
                }
                Err(kind)
            }
        }
    }

    async fn close(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Err(StoreError::ConnectionClosed);
        }
        self.pool.close().await;
        info!("Database pool closed");
        Ok(())
    }
}

#[async_trait]
impl HealthProbe for PgLinkStore {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn ping(&self, deadline: Instant) -> StoreResult<()> {
        let query = sqlx::query("SELECT 1").execute(self.pool.as_ref());

        timeout_at(deadline, query).await?.map_err(classify)?;
        Ok(())
    }
}
