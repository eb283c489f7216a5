//! Short alias generation.
//!
//! Alias length grows with the size of the link corpus:
//!
//! ```text
//! n      = max(1, approximate corpus size)
//! length = max(4, ceil(1.5 * log62(n)))
//! ```
//!
//! A fixed length collides more often as the corpus grows. Scaling the length
//! logarithmically keeps the chance that a fresh alias is taken near 1/62^2
//! for small corpora and around 1/sqrt(n) for very large ones. The size comes
//! from [`LinkRepository::size_approx`], which may be stale; a slightly wrong
//! length only shifts the collision odds.
//!
//! Generation never guarantees uniqueness. [`find_free_alias`] retries until
//! the existence check reports a free candidate, and the storage constraint
//! stays authoritative.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::debug;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Number of symbols an alias is drawn from: `[0-9A-Za-z]`.
pub const ALPHABET_SIZE: usize = 62;

/// Shortest alias ever generated, even for an empty corpus.
pub const MIN_ALIAS_LENGTH: usize = 4;

/// Returns the alias length for a corpus of roughly `size_estimate` links.
pub fn alias_length(size_estimate: i64) -> usize {
    let n = size_estimate.max(1) as f64;
    let digits = 1.5 * n.ln() / (ALPHABET_SIZE as f64).ln();
    (digits.ceil() as usize).max(MIN_ALIAS_LENGTH)
}

/// Returns a uniformly random alphanumeric string of `length` symbols.
pub fn random_alias(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Produces alias candidates.
///
/// Candidates are likely but not guaranteed to be free.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasGenerator: Send + Sync {
    async fn generate(&self) -> Result<String, AppError>;
}

/// Random generator sized by the repository's corpus estimate.
pub struct RandomAliasGenerator<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> RandomAliasGenerator<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }
}

#[async_trait]
impl<L: LinkRepository> AliasGenerator for RandomAliasGenerator<L> {
    async fn generate(&self) -> Result<String, AppError> {
        let size = self.link_repository.size_approx().await?;
        let length = alias_length(size);
        debug!(size, length, "Generating alias");
        Ok(random_alias(length))
    }
}

/// Draws candidates from `generator` until `is_taken` reports a free one.
///
/// Stops at the first generator error or existence-check error. There is no
/// attempt limit: the loop ends on a free alias, a failure, or when the caller
/// drops the future. It yields to the runtime after every taken candidate so
/// deadlines wrapped around it can fire.
pub async fn find_free_alias<G, F, Fut>(generator: &G, mut is_taken: F) -> Result<String, AppError>
where
    G: AliasGenerator + ?Sized,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let mut attempts: u64 = 0;
    loop {
        let candidate = generator.generate().await?;
        attempts += 1;

        if !is_taken(candidate.clone()).await? {
            debug!(alias = %candidate, attempts, "Found free alias");
            return Ok(candidate);
        }

        debug!(alias = %candidate, attempts, "Alias taken, retrying");
        tokio::task::yield_now().await;
    }
}
