//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;

pub use health::health_handler;
pub use links::{
    add_ad_handler, create_link_handler, delete_ad_handler, delete_link_handler,
    get_by_alias_handler, get_link_handler, list_links_handler, update_alias_handler,
};
pub use redirect::redirect_handler;
