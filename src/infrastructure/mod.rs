//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain repository traits.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL implementations of links storage and ads lookup

pub mod persistence;
