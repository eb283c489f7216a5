//! Link entity binding a target URL, an alias, an owner and a set of ads.

use serde::Serialize;
use validator::Validate;

/// Maximum length of a target URL, in characters.
pub const MAX_URL_LENGTH: u64 = 2048;

/// A stored short link.
///
/// `ads` holds opaque ad identifiers. The store returns them sorted and
/// without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Link {
    pub id: i64,
    #[validate(length(min = 1, max = MAX_URL_LENGTH))]
    pub url: String,
    #[validate(length(min = 1))]
    pub alias: String,
    pub author_id: i64,
    pub ads: Vec<i64>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, url: String, alias: String, author_id: i64, ads: Vec<i64>) -> Self {
        Self {
            id,
            url,
            alias,
            author_id,
            ads,
        }
    }

    /// Returns true if `ad_id` is associated with this link.
    pub fn has_ad(&self, ad_id: i64) -> bool {
        self.ads.contains(&ad_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewLink {
    #[validate(length(min = 1, max = MAX_URL_LENGTH))]
    pub url: String,
    #[validate(length(min = 1))]
    pub alias: String,
    pub author_id: i64,
    pub ads: Vec<i64>,
}

impl NewLink {
    /// Builds creation input, dropping repeated ad ids but keeping the order
    /// in which they first appear.
    pub fn new(url: String, alias: String, author_id: i64, ads: Vec<i64>) -> Self {
        let mut unique = Vec::with_capacity(ads.len());
        for ad in ads {
            if !unique.contains(&ad) {
                unique.push(ad);
            }
        }

        Self {
            url,
            alias,
            author_id,
            ads: unique,
        }
    }

    /// Turns the input into a stored link once the store has assigned an id.
    pub fn into_link(self, id: i64) -> Link {
        Link::new(id, self.url, self.alias, self.author_id, self.ads)
    }
}
