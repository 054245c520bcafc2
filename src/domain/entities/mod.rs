//! Core domain entities.
//!
//! - [`ShortLink`] - An alias mapped to its original URL

pub mod short_link;

pub use short_link::ShortLink;
