//! HTTP middleware and extractors for request processing.

pub mod author;
pub mod extract;
pub mod tracing;

pub use author::AuthorId;
pub use extract::{ApiJson, ApiPath};
