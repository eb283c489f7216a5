//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::ShortenerService;
use crate::infrastructure::persistence::{PgAdsLookup, PgLinkRepository};
use crate::utils::alias_generator::RandomAliasGenerator;

/// Shortener wired to its PostgreSQL collaborators.
pub type PgShortenerService =
    ShortenerService<PgLinkRepository, RandomAliasGenerator<PgLinkRepository>, PgAdsLookup>;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub shortener: Arc<PgShortenerService>,
}

impl AppState {
    /// Builds the service graph on top of a connection pool.
    pub fn new(db: Arc<PgPool>, alias_timeout: Duration) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(db.clone()));
        let alias_generator = Arc::new(RandomAliasGenerator::new(link_repository.clone()));
        let ads_lookup = Arc::new(PgAdsLookup::new(db.clone()));

        let shortener = ShortenerService::new(link_repository, alias_generator, ads_lookup)
            .with_alias_timeout(alias_timeout);

        Self {
            db,
            shortener: Arc::new(shortener),
        }
    }
}
