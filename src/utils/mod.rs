//! Helpers shared across layers.
//!
//! - [`alias_generator`] - Alias length scaling, candidate generation and the free-alias loop
//! - [`db_error`] - Constraint violation classification for storage errors

pub mod alias_generator;
pub mod db_error;
