//! PostgreSQL store implementation.
//!
//! - [`PgLinkStore`] - Alias record storage, lookup and schema bootstrap

pub mod pg_link_store;

pub use pg_link_store::PgLinkStore;
