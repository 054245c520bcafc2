//! Coordination services for the application layer.
//!
//! - [`RedirectService`] - Cache-aside alias resolution
//! - [`ShortenService`] - Idempotent alias creation with collision retry

pub mod redirect_service;
pub mod shorten_service;

pub use redirect_service::RedirectService;
pub use shorten_service::{ShortenPolicy, ShortenService};
