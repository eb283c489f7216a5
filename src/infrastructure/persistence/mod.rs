//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with SQLx and bound parameters.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Links and their ad associations
//! - [`PgAdsLookup`] - Published ads read from the shared `ads` table

pub mod pg_ads_lookup;
pub mod pg_link_repository;

pub use pg_ads_lookup::PgAdsLookup;
pub use pg_link_repository::PgLinkRepository;
