//! Infrastructure layer for external integrations.
//!
//! This layer implements the adapter traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Redis and in-memory cache implementations
//! - [`persistence`] - PostgreSQL store implementation

pub mod cache;
pub mod persistence;
