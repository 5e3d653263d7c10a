//! Catalog page extraction
//!
//! Turns one page of a category listing into product stubs: the product's
//! detail URL and identifier from the rendered markup, merged with the
//! variants the same page embeds in its script data.

use crate::catalog::ProductStub;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_selector;
use crate::crawler::variants::{extract_embedded_variants, BlobStatus};
use crate::state::SkipReason;
use crate::url::{catalog_page_url, resolve_link};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// One product tile in the listing
const PRODUCT_SELECTOR: &str = ".goodsBlock .goods";

/// The tile's link to the detail page
const LINK_SELECTOR: &str = "a";

/// The tile image whose `id` carries the product identifier
const IDENTIFIER_SELECTOR: &str = "img";

/// Stubs recovered from one catalog page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// Unique stubs in first-appearance order
    pub stubs: Vec<ProductStub>,

    /// Product tiles that were left out, one entry per tile
    pub dropped: Vec<SkipReason>,

    /// What became of the page's embedded variant data
    pub blob: BlobStatus,
}

/// Compiled selectors for a listing page
struct ListingSelectors {
    product: Selector,
    link: Selector,
    identifier: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, SkipReason> {
        Ok(Self {
            product: parse_selector(PRODUCT_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
            identifier: parse_selector(IDENTIFIER_SELECTOR)?,
        })
    }
}

/// Extracts the product stubs visible on a catalog page
///
/// Tiles without a link or identifier are dropped. When an identifier shows
/// up more than once, the stub keeps its first position and URL but takes
/// the variants looked up for the later tile.
///
/// # Arguments
///
/// * `html` - Raw page content, including its scripts
/// * `base` - Shop origin used to resolve relative links
pub fn parse_listing_page(html: &str, base: &Url) -> Result<ListingPage, SkipReason> {
    let selectors = ListingSelectors::new()?;

    let outcome = extract_embedded_variants(html);
    let blob = outcome.status();
    let variants = outcome.into_variants();

    let document = Html::parse_document(html);

    let mut stubs: Vec<ProductStub> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut dropped = Vec::new();

    for tile in document.select(&selectors.product) {
        let (url, identifier) = match read_tile(tile, &selectors, base) {
            Ok(found) => found,
            Err(reason) => {
                dropped.push(reason);
                continue;
            }
        };

        let tile_variants = variants.get(&identifier).cloned().unwrap_or_default();

        match positions.get(&identifier) {
            Some(&index) => stubs[index].variants = tile_variants,
            None => {
                positions.insert(identifier.clone(), stubs.len());
                stubs.push(ProductStub {
                    identifier,
                    url,
                    variants: tile_variants,
                });
            }
        }
    }

    Ok(ListingPage {
        stubs,
        dropped,
        blob,
    })
}

/// Reads the detail URL and identifier of a product tile
fn read_tile(
    tile: ElementRef<'_>,
    selectors: &ListingSelectors,
    base: &Url,
) -> Result<(String, String), SkipReason> {
    let href = tile
        .select(&selectors.link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or(SkipReason::MissingLink)?;

    let url = resolve_link(base, href).ok_or_else(|| SkipReason::InvalidUrl {
        url: href.to_string(),
        message: "does not resolve to an http(s) URL".to_string(),
    })?;

    // Identifiers are rendered with a one-character prefix
    let identifier = tile
        .select(&selectors.identifier)
        .next()
        .and_then(|image| image.value().attr("id"))
        .map(|id| id.chars().skip(1).collect::<String>())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SkipReason::MissingIdentifier { url: url.clone() })?;

    Ok((url, identifier))
}

/// Fetches and extracts page `page` (1-based) of a category
///
/// A page that cannot be fetched is reported as
/// [`SkipReason::FetchFailed`]; the caller treats it as contributing no
/// products.
pub async fn extract_catalog_page<F: PageFetcher>(
    fetcher: &F,
    base: &Url,
    category_url: &str,
    page: u32,
) -> Result<ListingPage, SkipReason> {
    let page_url = catalog_page_url(category_url, page);
    tracing::info!("Processing catalog page: {}", page_url);

    let html = fetcher
        .fetch(&page_url)
        .await
        .ok_or_else(|| SkipReason::FetchFailed {
            url: page_url.clone(),
        })?;

    let listing = parse_listing_page(&html, base)?;
    tracing::info!(
        "Found {} products on page {} of {}",
        listing.stubs.len(),
        page,
        category_url
    );

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::test_support::MapFetcher;
    use serde_json::Number;

    fn base() -> Url {
        Url::parse("https://www.zveromir.ru/").unwrap()
    }

    fn tile(href: Option<&str>, image_id: Option<&str>) -> String {
        let link = href
            .map(|h| format!(r#"<a href="{}">Товар</a>"#, h))
            .unwrap_or_default();
        let image = image_id
            .map(|id| format!(r#"<img id="{}" src="/img.jpg">"#, id))
            .unwrap_or_else(|| r#"<img src="/img.jpg">"#.to_string());
        format!(r#"<div class="goods">{}{}</div>"#, image, link)
    }

    fn listing(tiles: &[String], script: &str) -> String {
        format!(
            r#"<html><body><div class="goodsBlock">{}</div><script>{}</script></body></html>"#,
            tiles.concat(),
            script
        )
    }

    #[test]
    fn test_stubs_merge_variants_by_identifier() {
        let html = listing(
            &[
                tile(Some("/shop/goods/1042/"), Some("i1042")),
                tile(Some("https://www.zveromir.ru/shop/goods/77/"), Some("i77")),
            ],
            r#"var items_v = {"1042": [{"art": "A", "mass": "1 кг", "price": 100}]};"#,
        );

        let page = parse_listing_page(&html, &base()).unwrap();
        assert_eq!(page.blob, BlobStatus::Decoded);
        assert_eq!(page.stubs.len(), 2);

        assert_eq!(page.stubs[0].identifier, "1042");
        assert_eq!(page.stubs[0].url, "https://www.zveromir.ru/shop/goods/1042/");
        assert_eq!(page.stubs[0].variants.len(), 1);
        assert_eq!(page.stubs[0].variants[0].price, Some(Number::from(100)));

        // Not present in the blob: no variants, still a stub
        assert_eq!(page.stubs[1].identifier, "77");
        assert!(page.stubs[1].variants.is_empty());
    }

    #[test]
    fn test_tiles_without_link_or_identifier_dropped() {
        let html = listing(
            &[
                tile(None, Some("i1")),
                tile(Some("   "), Some("i2")),
                tile(Some("/shop/goods/3/"), None),
                tile(Some("/shop/goods/4/"), Some("x")),
                tile(Some("/shop/goods/5/"), Some("i5")),
            ],
            "",
        );

        let page = parse_listing_page(&html, &base()).unwrap();
        assert_eq!(page.stubs.len(), 1);
        assert_eq!(page.stubs[0].identifier, "5");
        assert_eq!(page.dropped.len(), 4);
        assert!(page.dropped.iter().all(SkipReason::is_silent));
        assert_eq!(page.blob, BlobStatus::Absent);
    }

    #[test]
    fn test_repeated_identifier_takes_later_variants() {
        let html = listing(
            &[
                tile(Some("/shop/goods/8/"), Some("i8")),
                tile(Some("/shop/goods/9/"), Some("i9")),
                tile(Some("/shop/goods/8/?from=promo"), Some("i8")),
            ],
            r#"var items_v = {"8": [{"art": "late"}], "9": []};"#,
        );

        let page = parse_listing_page(&html, &base()).unwrap();
        let identifiers: Vec<_> = page.stubs.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["8", "9"]);
        assert_eq!(page.stubs[0].url, "https://www.zveromir.ru/shop/goods/8/");
        assert_eq!(page.stubs[0].variants[0].article.as_deref(), Some("late"));
    }

    #[test]
    fn test_malformed_blob_leaves_variants_empty() {
        let html = listing(
            &[
                tile(Some("/shop/goods/1/"), Some("i1")),
                tile(Some("/shop/goods/2/"), Some("i2")),
            ],
            r#"var items_v = {"1": [{"art": "A",]};"#,
        );

        let page = parse_listing_page(&html, &base()).unwrap();
        assert_eq!(page.blob, BlobStatus::Malformed);
        assert_eq!(page.stubs.len(), 2);
        assert!(page.stubs.iter().all(|s| s.variants.is_empty()));
    }

    #[tokio::test]
    async fn test_later_pages_use_page_segment() {
        let category = "https://www.zveromir.ru/shop/furminatori/";
        let fetcher = MapFetcher::new().with_page(
            "https://www.zveromir.ru/shop/furminatori/page/2/",
            &listing(&[tile(Some("/shop/goods/6/"), Some("i6"))], ""),
        );

        let page = extract_catalog_page(&fetcher, &base(), category, 2)
            .await
            .unwrap();
        assert_eq!(page.stubs.len(), 1);

        let missing = extract_catalog_page(&fetcher, &base(), category, 1).await;
        assert_eq!(
            missing,
            Err(SkipReason::FetchFailed {
                url: category.to_string()
            })
        );
    }
}
