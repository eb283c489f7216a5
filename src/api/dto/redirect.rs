//! DTOs for redirect resolution.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AdSummary, Redirect};

/// Ad attached to a redirect.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
}

impl From<AdSummary> for AdResponse {
    fn from(ad: AdSummary) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            text: ad.text,
        }
    }
}

/// Response for `GET /link/{alias}`.
///
/// `ad` is `null` when the link has no published ads.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub url: String,
    pub ad: Option<AdResponse>,
}

impl From<Redirect> for RedirectResponse {
    fn from(redirect: Redirect) -> Self {
        Self {
            url: redirect.link.url,
            ad: redirect.ad.map(AdResponse::from),
        }
    }
}
