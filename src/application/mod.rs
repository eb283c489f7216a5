//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! call. Ownership checks and membership checks live here, not in handlers.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Link allocation, mutation and redirect resolution

pub mod services;
