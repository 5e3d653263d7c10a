//! Crawler coordinator - main crawl orchestration logic
//!
//! One pass per invocation, strictly sequential:
//! for each configured category, analyze its first page, extract stubs from
//! every catalog page, parse every stub's detail page, and append the
//! finished records. Failures at any level only remove that unit's
//! contribution; the coordinator logs and counts every skip.

use crate::catalog::{Category, CrawlResult};
use crate::config::Config;
use crate::crawler::category::{analyze_category, NameSource};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::{extract_catalog_page, ListingPage};
use crate::crawler::product::parse_product;
use crate::crawler::variants::BlobStatus;
use crate::output::{log_statistics, ResultSink};
use crate::state::{CrawlStats, SkipReason, SkipScope};
use crate::ShopError;
use tracing::Instrument;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator<F: PageFetcher> {
    fetcher: F,
    base_url: Url,
    categories: Vec<String>,
    stats: CrawlStats,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Source of page content
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ShopError)` - The configured base URL is not a valid URL
    pub fn new(config: &Config, fetcher: F) -> Result<Self, ShopError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let categories = config.categories.iter().map(|c| c.url.clone()).collect();

        Ok(Self {
            fetcher,
            base_url,
            categories,
            stats: CrawlStats::new(),
        })
    }

    /// Runs one full crawl and returns the assembled result
    ///
    /// Categories appear in configuration order; a category whose crawl
    /// fails is omitted. Statistics for the run are available from
    /// [`Coordinator::stats`] afterwards.
    pub async fn run(&mut self) -> CrawlResult {
        self.stats = CrawlStats::new();
        tracing::info!("Starting crawl of {} categories", self.categories.len());

        let mut result = CrawlResult::with_capacity(self.categories.len());

        for category_url in self.categories.clone() {
            tracing::info!("Processing category: {}", category_url);

            let span = tracing::info_span!("category", url = %category_url);
            match self.crawl_category(&category_url).instrument(span).await {
                Ok(category) => {
                    tracing::info!(
                        "Category {} done: {} products",
                        category.name,
                        category.goods.len()
                    );
                    self.stats.categories_crawled += 1;
                    result.push(category);
                }
                Err(reason) => {
                    tracing::error!("Skipping category {}: {}", category_url, reason);
                    self.stats.record_skip(SkipScope::Category, &reason);
                }
            }
        }

        self.stats.finish();
        result
    }

    /// Statistics of the most recent run
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Consumes the coordinator, returning the statistics of the last run
    pub fn into_stats(self) -> CrawlStats {
        self.stats
    }

    async fn crawl_category(&mut self, category_url: &str) -> Result<Category, SkipReason> {
        Url::parse(category_url).map_err(|e| SkipReason::InvalidUrl {
            url: category_url.to_string(),
            message: e.to_string(),
        })?;

        let overview = analyze_category(&self.fetcher, category_url).await;
        if overview.name_source == NameSource::UrlFallback {
            self.stats.category_name_fallbacks += 1;
        }

        let mut category = Category::new(overview.name);

        for page in 1..=overview.page_count {
            tracing::info!(
                "Processing page {} of {} for category {}",
                page,
                overview.page_count,
                category.name
            );

            let span = tracing::info_span!("page", number = page);
            let listing = extract_catalog_page(&self.fetcher, &self.base_url, category_url, page)
                .instrument(span)
                .await;

            let stubs = match listing {
                Ok(listing) => {
                    self.record_listing(category_url, page, &listing);
                    listing.stubs
                }
                Err(reason) => {
                    tracing::warn!(
                        "Skipping page {} of {}: {}",
                        page,
                        category_url,
                        reason
                    );
                    self.stats.record_skip(SkipScope::Page, &reason);
                    continue;
                }
            };

            for stub in stubs {
                let identifier = stub.identifier.clone();
                let url = stub.url.clone();

                let span = tracing::debug_span!("product", id = %identifier);
                match parse_product(&self.fetcher, &self.base_url, stub)
                    .instrument(span)
                    .await
                {
                    Ok(record) => {
                        self.stats.products_saved += 1;
                        category.goods.push(record);
                    }
                    Err(reason) => {
                        tracing::warn!("Dropping product {} ({}): {}", identifier, url, reason);
                        self.stats.record_skip(SkipScope::Product, &reason);
                    }
                }
            }
        }

        Ok(category)
    }

    fn record_listing(&mut self, category_url: &str, page: u32, listing: &ListingPage) {
        self.stats.pages_extracted += 1;

        match listing.blob {
            BlobStatus::Decoded => {}
            BlobStatus::Absent => {
                self.stats.blobs_absent += 1;
                tracing::debug!("No embedded variant data on page {} of {}", page, category_url);
            }
            BlobStatus::Malformed => {
                self.stats.blobs_malformed += 1;
                tracing::warn!(
                    "Embedded variant data on page {} of {} is malformed; variants left empty",
                    page,
                    category_url
                );
            }
        }

        for reason in &listing.dropped {
            if reason.is_silent() {
                tracing::debug!("Dropped product tile on page {} of {}: {}", page, category_url, reason);
            } else {
                tracing::warn!("Dropped product tile on page {} of {}: {}", page, category_url, reason);
            }
            self.stats.record_skip(SkipScope::Stub, reason);
        }
    }
}

/// Runs one crawl and hands the result to `sink`
///
/// The sink is called exactly once, after every category has been
/// processed. A sink failure ends the run with an error; nothing else does.
///
/// # Example
///
/// ```no_run
/// use shop_sweep::config::Config;
/// use shop_sweep::crawler::{run_crawl, HttpFetcher};
/// use shop_sweep::output::JsonFileSink;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = HttpFetcher::new(&config.fetcher)?;
/// let sink = JsonFileSink::new(&config.output.path);
/// let stats = run_crawl(&config, fetcher, &sink).await?;
/// println!("{} products saved", stats.products_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<F, S>(config: &Config, fetcher: F, sink: &S) -> Result<CrawlStats, ShopError>
where
    F: PageFetcher,
    S: ResultSink,
{
    let mut coordinator = Coordinator::new(config, fetcher)?;
    let result = coordinator.run().await;
    let stats = coordinator.into_stats();

    log_statistics(&stats);

    if let Err(e) = sink.persist(&result) {
        tracing::error!("Failed to persist crawl result: {}", e);
        return Err(e.into());
    }

    tracing::info!(
        "Crawl finished; next run in {} days",
        config.schedule.interval_days
    );
    Ok(stats)
}
