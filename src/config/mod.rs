//! Configuration module for Shop-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Without a file, [`Config::default`] yields the built-in shop and
//! category list.
//!
//! # Example
//!
//! ```no_run
//! use shop_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shop.toml")).unwrap();
//! println!("Crawling every {} days", config.schedule.interval_days);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CategoryEntry, Config, FetcherConfig, LoggingConfig, OutputConfig, ScheduleConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, override_output_path, parse_config,
};
pub use validation::validate;
