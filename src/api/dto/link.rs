//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, MAX_URL_LENGTH};

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = MAX_URL_LENGTH))]
    pub url: String,

    /// Custom alias. Omitted or empty means generate one.
    pub alias: Option<String>,

    /// Ad ids to attach. Repeats are ignored.
    #[serde(default)]
    pub ads: Vec<i64>,
}

/// Request body for `PUT /api/links/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAliasRequest {
    /// New alias. Omitted or empty means generate one.
    pub alias: Option<String>,
}

/// Request body for `PUT` and `DELETE` on `/api/links/{id}/ads`.
#[derive(Debug, Deserialize)]
pub struct AdRequest {
    pub ad_id: i64,
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub id: i64,
    pub url: String,
    pub alias: String,
    pub author_id: i64,
    pub ads: Vec<i64>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            url: link.url,
            alias: link.alias,
            author_id: link.author_id,
            ads: link.ads,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert!(req.alias.is_none());
        assert!(req.ads.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_url() {
        let req: CreateLinkRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_url_length_limit() {
        let at_limit = CreateLinkRequest {
            url: "a".repeat(MAX_URL_LENGTH as usize),
            alias: None,
            ads: vec![],
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = CreateLinkRequest {
            url: "a".repeat(MAX_URL_LENGTH as usize + 1),
            alias: None,
            ads: vec![],
        };
        assert!(over_limit.validate().is_err());
    }
}
