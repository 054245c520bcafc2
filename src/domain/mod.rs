//! Domain layer containing entities, adapter contracts and the failure taxonomy.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Cache, store and probe trait definitions
//! - [`store_error`] - Closed set of adapter failure kinds
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure layer
//! - Coordination policy lives in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
pub mod store_error;

pub use store_error::{StoreError, StoreResult};
