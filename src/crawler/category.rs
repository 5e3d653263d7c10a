//! Category page analysis
//!
//! Reads a category's first listing page to find its display name and how
//! many catalog pages it spans. This step never fails: anything that goes
//! wrong degrades to the URL-derived name and a single page.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{first_text, parse_selector};
use crate::state::SkipReason;
use crate::url::category_name_from_url;
use scraper::Html;

/// Category heading
const HEADING_SELECTOR: &str = "h1";

/// Pagination control labels
const PAGINATION_SELECTOR: &str = ".yiiPager .page";

/// Where a category's name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Heading,
    UrlFallback,
}

/// Name and pagination size of a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOverview {
    pub name: String,
    pub page_count: u32,
    pub name_source: NameSource,
}

impl CategoryOverview {
    /// The degraded overview used when the listing page is unusable
    pub fn fallback(category_url: &str) -> Self {
        Self {
            name: category_name_from_url(category_url),
            page_count: 1,
            name_source: NameSource::UrlFallback,
        }
    }
}

/// Extracts the category overview from a listing page
///
/// The name is the first heading's text, or the URL-derived name when there
/// is no heading. The page count is the largest integer among the pagination
/// labels; labels such as "next" are ignored and no labels means one page.
pub fn parse_category_page(html: &str, category_url: &str) -> Result<CategoryOverview, SkipReason> {
    let heading = parse_selector(HEADING_SELECTOR)?;
    let pagination = parse_selector(PAGINATION_SELECTOR)?;
    let document = Html::parse_document(html);

    let (name, name_source) = match first_text(&document, &heading) {
        Some(name) => (name, NameSource::Heading),
        None => (category_name_from_url(category_url), NameSource::UrlFallback),
    };

    let page_count = document
        .select(&pagination)
        .filter_map(|label| {
            label
                .text()
                .collect::<String>()
                .trim()
                .parse::<u32>()
                .ok()
        })
        .max()
        .unwrap_or(1)
        .max(1);

    Ok(CategoryOverview {
        name,
        page_count,
        name_source,
    })
}

/// Fetches and analyzes a category's first page
pub async fn analyze_category<F: PageFetcher>(fetcher: &F, category_url: &str) -> CategoryOverview {
    let overview = match fetcher.fetch(category_url).await {
        Some(html) => parse_category_page(&html, category_url).unwrap_or_else(|reason| {
            tracing::warn!(
                "Could not analyze category page {}: {}; using URL-derived name",
                category_url,
                reason
            );
            CategoryOverview::fallback(category_url)
        }),
        None => {
            tracing::warn!(
                "Category page {} unavailable; using URL-derived name and a single page",
                category_url
            );
            CategoryOverview::fallback(category_url)
        }
    };

    if overview.name_source == NameSource::UrlFallback {
        tracing::debug!("Category {} named from URL: {}", category_url, overview.name);
    }

    tracing::info!(
        "Category: {}, pages: {}",
        overview.name,
        overview.page_count
    );
    overview
}
