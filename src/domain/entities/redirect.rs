//! Result of resolving an alias.

use super::{AdSummary, Link};

/// A resolved link together with the ad chosen to accompany it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub link: Link,
    pub ad: Option<AdSummary>,
}

impl Redirect {
    pub fn new(link: Link, ad: Option<AdSummary>) -> Self {
        Self { link, ad }
    }

    /// Target URL of the redirect.
    pub fn url(&self) -> &str {
        &self.link.url
    }
}
