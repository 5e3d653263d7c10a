//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `SkipReason`: Why a category, page, stub, or product was left out
//! - `SkipScope`: The granularity at which a skip happened
//! - `CrawlStats`: Per-run counters aggregated by the coordinator

mod skip;
mod stats;

// Re-export main types
pub use skip::{SkipReason, SkipScope};
pub use stats::CrawlStats;
