//! Shop-Sweep: a periodic e-commerce catalog crawler
//!
//! This crate crawls a fixed set of category listings, discovers every
//! paginated catalog page, merges product stubs from the rendered HTML with
//! the variant data embedded in the page scripts, enriches each product from
//! its detail page and persists the aggregated catalog as one JSON document.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shop-Sweep operations
///
/// Only run-terminating failures surface here. Per-category, per-page and
/// per-product problems are reported as [`state::SkipReason`] instead.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shop-Sweep operations
pub type Result<T> = std::result::Result<T, ShopError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Category, CrawlResult, ProductRecord, ProductStub, Variant};
pub use config::Config;
pub use state::{CrawlStats, SkipReason};
