//! Crawler module for catalog fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` port
//! - Category analysis (name and page count)
//! - Embedded variant data extraction
//! - Catalog page and product detail parsing
//! - Overall crawl coordination and recurring scheduling

mod category;
mod coordinator;
mod fetcher;
mod listing;
mod parser;
mod product;
mod scheduler;
mod variants;

#[cfg(test)]
pub(crate) mod test_support;

pub use category::{analyze_category, parse_category_page, CategoryOverview, NameSource};
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchError, HttpFetcher, PageFetcher};
pub use listing::{extract_catalog_page, parse_listing_page, ListingPage};
pub use product::{parse_product, parse_product_page, ProductDetails};
pub use scheduler::Schedule;
pub use variants::{
    decode_items_blob, extract_embedded_variants, locate_items_blob, BlobOutcome, BlobStatus,
    VariantMap,
};

use crate::config::Config;
use crate::output::JsonFileSink;
use crate::state::CrawlStats;
use crate::ShopError;

/// Runs a complete crawl against the live shop
///
/// This is the main entry point for a single run. It will:
/// 1. Build the HTTP fetcher from the fetcher configuration
/// 2. Crawl every configured category in order
/// 3. Write the catalog to the configured output path
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed and the catalog was written
/// * `Err(ShopError)` - The client could not be built or the output could not be written
pub async fn crawl(config: &Config) -> Result<CrawlStats, ShopError> {
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let sink = JsonFileSink::new(&config.output.path);
    run_crawl(config, fetcher, &sink).await
}
