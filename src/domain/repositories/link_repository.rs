//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for links and their ad associations.
///
/// Alias uniqueness is enforced here, by the storage constraint. Callers may
/// pre-check an alias with [`LinkRepository::get_by_alias`], but must still
/// handle [`AppError::AlreadyExists`] from writes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns a cheap, possibly stale estimate of the number of links.
    ///
    /// Returns `Ok(0)` when no estimate is available.
    async fn size_approx(&self) -> Result<i64, AppError>;

    /// Stores a link and all of its ad associations as one unit.
    ///
    /// Returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// - [`AppError::AlreadyExists`] if the alias is taken
    /// - [`AppError::AdNotExists`] if an ad id is unknown to the ads domain
    ///
    /// No link row survives a failed association insert.
    async fn store(&self, new_link: NewLink) -> Result<i64, AppError>;

    /// Fetches a link with its associated ad ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn get_by_id(&self, id: i64) -> Result<Link, AppError>;

    /// Fetches a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is free.
    async fn get_by_alias(&self, alias: &str) -> Result<Link, AppError>;

    /// Lists every link owned by `author_id`, each with its associations.
    async fn get_by_author(&self, author_id: i64) -> Result<Vec<Link>, AppError>;

    /// Renames a link.
    ///
    /// # Errors
    ///
    /// - [`AppError::AlreadyExists`] if the alias is taken
    /// - [`AppError::NotFound`] if the link no longer exists
    async fn update_alias(&self, id: i64, alias: &str) -> Result<(), AppError>;

    /// Associates an ad with a link.
    ///
    /// Membership is not pre-checked here.
    ///
    /// # Errors
    ///
    /// - [`AppError::AdNotExists`] if the ad is unknown
    /// - [`AppError::NotFound`] if the link no longer exists
    /// - [`AppError::AlreadyAdded`] if the pair is already stored
    async fn add_ad(&self, link_id: i64, ad_id: i64) -> Result<(), AppError>;

    /// Removes an ad association.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pair does not exist.
    async fn delete_ad(&self, link_id: i64, ad_id: i64) -> Result<(), AppError>;

    /// Removes a link together with all of its associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
