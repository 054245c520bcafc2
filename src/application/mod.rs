//! Application layer coordinating cache and store adapters.
//!
//! Services consume the adapter traits from [`crate::domain::repositories`] and
//! own all retry and fallback policy; adapters never retry on their own.
//!
//! # Modules
//!
//! - [`services`] - Redirect (read path) and shorten (write path) coordinators
//! - [`liveness`] - Background ping loops for the cache and the store

pub mod liveness;
pub mod services;
