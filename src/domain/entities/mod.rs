//! Core domain entities of the shortener.
//!
//! Entities are plain data structures. [`NewLink`] is the creation input for
//! [`Link`]; [`Redirect`] is the read model produced by alias resolution.

pub mod ad;
pub mod link;
pub mod redirect;

pub use ad::AdSummary;
pub use link::{Link, MAX_URL_LENGTH, NewLink};
pub use redirect::Redirect;
