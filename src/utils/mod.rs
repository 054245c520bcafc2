//! Utility functions shared across layers.
//!
//! - [`alias_generator`] - Random alias generation
//! - [`backend_error`] - Classification of `sqlx`/`redis` errors
//! - [`url_validator`] - Original URL validation

pub mod alias_generator;
pub mod backend_error;
pub mod url_validator;
