//! Adapter trait definitions for the domain layer.
//!
//! Coordinators depend only on these traits; concrete implementations live in
//! `crate::infrastructure`. Every operation reports failures through
//! [`crate::domain::store_error::StoreError`].
//!
//! # Available Traits
//!
//! - [`LinkStore`] - Durable alias records
//! - [`LinkCache`] - TTL-bounded alias cache
//! - [`HealthProbe`] - Liveness pings
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` under `cfg(test)`.
//! See `tests/store_postgres.rs` and `tests/cache_redis.rs` for the real adapters.

pub mod health_probe;
pub mod link_cache;
pub mod link_store;

pub use health_probe::HealthProbe;
pub use link_cache::LinkCache;
pub use link_store::LinkStore;

#[cfg(test)]
pub use health_probe::MockHealthProbe;
#[cfg(test)]
pub use link_cache::MockLinkCache;
#[cfg(test)]
pub use link_store::MockLinkStore;
