//! URL handling module for Shop-Sweep
//!
//! This module provides link resolution against the shop origin, catalog
//! page addressing and the URL-derived category names used when a listing
//! page cannot be read.

mod resolve;
mod slug;

// Re-export main functions
pub use resolve::{catalog_page_url, resolve_link};
pub use slug::{category_name_from_url, title_case};
