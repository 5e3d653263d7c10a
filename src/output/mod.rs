//! Output module for persisting crawl results
//!
//! This module handles:
//! - The `ResultSink` port the coordinator hands each finished crawl to
//! - Writing the catalog as a JSON document, atomically
//! - Reporting crawl statistics

mod json;
pub mod stats;
mod traits;

pub use json::{load_result, JsonFileSink};
pub use stats::{format_statistics, log_statistics, print_statistics};
pub use traits::{OutputError, OutputResult, ResultSink};
