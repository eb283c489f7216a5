//! Short link allocation, mutation and redirect resolution.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde_json::json;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::domain::entities::{AdSummary, Link, NewLink, Redirect};
use crate::domain::repositories::{AdsLookup, LinkRepository};
use crate::error::{AppError, ErrorKind};
use crate::utils::alias_generator::{AliasGenerator, find_free_alias};

/// Default deadline for finding a free alias.
pub const DEFAULT_ALIAS_TIMEOUT: Duration = Duration::from_secs(2);

/// Service orchestrating links, alias allocation and ad lookup.
///
/// Every mutation follows the same steps: load the link, check the author,
/// validate, write. Nothing is cached between calls; each call reloads the
/// link from the repository and returns the updated value.
///
/// Membership checks in [`Self::add_ad`] and [`Self::delete_ad`] run against
/// the freshly loaded copy. Two concurrent callers mutating the same link may
/// each see a stale list in their result; the store applies both writes.
pub struct ShortenerService<L, G, A>
where
    L: LinkRepository,
    G: AliasGenerator,
    A: AdsLookup,
{
    link_repository: Arc<L>,
    alias_generator: Arc<G>,
    ads_lookup: Arc<A>,
    alias_timeout: Duration,
}

impl<L, G, A> ShortenerService<L, G, A>
where
    L: LinkRepository,
    G: AliasGenerator,
    A: AdsLookup,
{
    /// Creates a new shortener service.
    pub fn new(link_repository: Arc<L>, alias_generator: Arc<G>, ads_lookup: Arc<A>) -> Self {
        Self {
            link_repository,
            alias_generator,
            ads_lookup,
            alias_timeout: DEFAULT_ALIAS_TIMEOUT,
        }
    }

    /// Overrides the deadline for free-alias search.
    pub fn with_alias_timeout(mut self, alias_timeout: Duration) -> Self {
        self.alias_timeout = alias_timeout;
        self
    }

    /// Creates a short link.
    ///
    /// When `alias` is `None` or empty, a free alias is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidContent`] if the URL or alias violates length rules
    /// - [`AppError::AlreadyExists`] if the alias is taken. This includes a
    ///   generated alias claimed by another writer between the free check and
    ///   the insert; it is reported, not retried.
    /// - [`AppError::AdNotExists`] if an ad id is unknown
    #[instrument(skip(self, url, ads), fields(ad_count = ads.len()))]
    pub async fn create(
        &self,
        url: String,
        alias: Option<String>,
        author_id: i64,
        ads: Vec<i64>,
    ) -> Result<Link, AppError> {
        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => self.generate_free_alias().await?,
        };

        let new_link = NewLink::new(url, alias, author_id, ads);
        new_link.validate()?;

        let id = self.link_repository.store(new_link.clone()).await?;
        debug!(link_id = id, alias = %new_link.alias, "Link created");

        Ok(new_link.into_link(id))
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository.get_by_id(id).await
    }

    /// Lists links owned by `author_id`.
    #[instrument(skip(self))]
    pub async fn get_by_author(&self, author_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.get_by_author(author_id).await
    }

    /// Retrieves a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is free.
    #[instrument(skip(self))]
    pub async fn get_by_alias(&self, alias: &str) -> Result<Link, AppError> {
        self.link_repository.get_by_alias(alias).await
    }

    /// Resolves an alias to its link and, if available, one published ad.
    ///
    /// The ad is drawn uniformly at random from the currently published ads
    /// of the link, once per call. A failing or empty ads lookup yields a
    /// redirect without ad; it is never an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is free.
    #[instrument(skip(self))]
    pub async fn get_redirect(&self, alias: &str) -> Result<Redirect, AppError> {
        let link = self.link_repository.get_by_alias(alias).await?;

        if link.ads.is_empty() {
            return Ok(Redirect::new(link, None));
        }

        let ad = match self.ads_lookup.get_only_published(&link.ads).await {
            Ok(published) => pick_random(published),
            Err(e) if e.is(ErrorKind::NoAds) => None,
            Err(e) => {
                warn!(error = %e, details = %e.details(), link_id = link.id, "Ads lookup failed, redirecting without ad");
                None
            }
        };

        if ad.is_none() {
            debug!(link_id = link.id, "No published ads for link");
        }

        Ok(Redirect::new(link, ad))
    }

    /// Renames a link owned by `author_id`.
    ///
    /// When `alias` is `None` or empty, a free alias is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::PermissionDenied`] if `author_id` does not own the link
    /// - [`AppError::InvalidContent`] if the resulting link is invalid
    /// - [`AppError::AlreadyExists`] if the alias is taken
    /// - [`AppError::NotFound`] if the link does not exist
    #[instrument(skip(self))]
    pub async fn update_alias(
        &self,
        id: i64,
        author_id: i64,
        alias: Option<String>,
    ) -> Result<Link, AppError> {
        let link = self.get_editable(id, author_id).await?;

        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => self.generate_free_alias().await?,
        };

        let renamed = Link {
            alias,
            ..link
        };
        renamed.validate()?;

        self.link_repository
            .update_alias(id, &renamed.alias)
            .await?;

        Ok(renamed)
    }

    /// Associates `ad_id` with a link owned by `author_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::PermissionDenied`] if `author_id` does not own the link
    /// - [`AppError::AlreadyAdded`] if the ad is already associated
    /// - [`AppError::AdNotExists`] if the ad is unknown
    #[instrument(skip(self))]
    pub async fn add_ad(&self, link_id: i64, ad_id: i64, author_id: i64) -> Result<Link, AppError> {
        let mut link = self.get_editable(link_id, author_id).await?;

        if link.has_ad(ad_id) {
            return Err(AppError::already_added(
                "Ad has already been added",
                json!({ "link_id": link_id, "ad_id": ad_id }),
            ));
        }

        self.link_repository.add_ad(link_id, ad_id).await?;
        link.ads.push(ad_id);

        Ok(link)
    }

    /// Removes `ad_id` from a link owned by `author_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::PermissionDenied`] if `author_id` does not own the link
    /// - [`AppError::NotFound`] if the ad is not associated with the link
    #[instrument(skip(self))]
    pub async fn delete_ad(
        &self,
        link_id: i64,
        ad_id: i64,
        author_id: i64,
    ) -> Result<Link, AppError> {
        let mut link = self.get_editable(link_id, author_id).await?;

        let Some(position) = link.ads.iter().position(|&id| id == ad_id) else {
            return Err(AppError::not_found(
                "Ad is not associated with this link",
                json!({ "link_id": link_id, "ad_id": ad_id }),
            ));
        };

        self.link_repository.delete_ad(link_id, ad_id).await?;
        link.ads.remove(position);

        Ok(link)
    }

    /// Deletes a link owned by `author_id` and all of its associations.
    ///
    /// # Errors
    ///
    /// - [`AppError::PermissionDenied`] if `author_id` does not own the link
    /// - [`AppError::NotFound`] if the link does not exist
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64, author_id: i64) -> Result<(), AppError> {
        self.get_editable(id, author_id).await?;
        self.link_repository.delete(id).await
    }

    /// Loads a link and checks that `author_id` may modify it.
    async fn get_editable(&self, id: i64, author_id: i64) -> Result<Link, AppError> {
        let link = self.link_repository.get_by_id(id).await?;

        if link.author_id != author_id {
            return Err(AppError::permission_denied(
                "Permission denied",
                json!({ "link_id": id }),
            ));
        }

        Ok(link)
    }

    /// Generates an alias that is not taken at the time of the check.
    async fn generate_free_alias(&self) -> Result<String, AppError> {
        let repository = &self.link_repository;
        let search = find_free_alias(self.alias_generator.as_ref(), |candidate| async move {
            match repository.get_by_alias(&candidate).await {
                Ok(_) => Ok(true),
                Err(e) if e.is(ErrorKind::NotFound) => Ok(false),
                Err(e) => Err(e),
            }
        });

        tokio::time::timeout(self.alias_timeout, search)
            .await
            .map_err(|_| {
                AppError::internal(
                    "Failed to generate a free alias",
                    json!({ "reason": "deadline exceeded", "timeout_ms": self.alias_timeout.as_millis() as u64 }),
                )
            })?
    }
}

/// Picks one element uniformly at random.
fn pick_random(mut ads: Vec<AdSummary>) -> Option<AdSummary> {
    if ads.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..ads.len());
    Some(ads.swap_remove(index))
}
