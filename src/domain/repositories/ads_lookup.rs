//! Port to the ads domain.

use crate::domain::entities::AdSummary;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to published ads.
///
/// The shortener never asks for unpublished ads and never mutates ad state.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdsLookup`] - reads the shared `ads` table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdsLookup: Send + Sync {
    /// Returns the subset of `ad_ids` that is currently published.
    ///
    /// Unknown and unpublished ids are silently left out.
    async fn get_only_published(&self, ad_ids: &[i64]) -> Result<Vec<AdSummary>, AppError>;
}
