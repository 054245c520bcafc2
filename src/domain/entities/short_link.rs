//! ShortLink entity: the durable alias → URL record.

use chrono::{DateTime, Utc};

/// A persisted mapping from a generated alias to its original URL.
///
/// Created once by [`crate::application::services::ShortenService`], never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub alias: String,
    pub original: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a record stamped with the current time.
    pub fn new(alias: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            original: original.into(),
            created_at: Utc::now(),
        }
    }
}
