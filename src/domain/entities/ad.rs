//! Display data of a published advertisement.

use serde::Serialize;

/// A published ad as returned by the ads domain.
///
/// The shortener never stores ad content; it is fetched per redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdSummary {
    pub id: i64,
    pub title: String,
    pub text: String,
}

impl AdSummary {
    pub fn new(id: i64, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
        }
    }
}
