//! Repository and port trait definitions for the domain layer.
//!
//! Traits define the contract for data operations. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Traits
//!
//! - [`LinkRepository`] - Links and their ad associations
//! - [`AdsLookup`] - Published ads owned by the ads domain
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod ads_lookup;
pub mod link_repository;

pub use ads_lookup::AdsLookup;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use ads_lookup::MockAdsLookup;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
