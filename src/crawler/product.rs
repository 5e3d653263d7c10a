//! Product detail parsing
//!
//! Visits a stub's detail page and fills in name, description and image.
//! Variants come from the catalog page and pass through untouched.

use crate::catalog::{ProductRecord, ProductStub};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{first_attr, first_text, parse_selector};
use crate::state::SkipReason;
use crate::url::resolve_link;
use scraper::Html;
use url::Url;

const NAME_SELECTOR: &str = "h1";
const DESCRIPTION_SELECTOR: &str = "[itemprop=description]";
const IMAGE_SELECTOR: &str = ".eslider-main-img";

/// Detail fields read from a product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Extracts the detail fields from a product page
///
/// Each field is independent: a missing element leaves that field `None`
/// without affecting the others. Non-breaking spaces in the description
/// become plain spaces, and the image source is resolved against `base`.
pub fn parse_product_page(html: &str, base: &Url) -> Result<ProductDetails, SkipReason> {
    let name_selector = parse_selector(NAME_SELECTOR)?;
    let description_selector = parse_selector(DESCRIPTION_SELECTOR)?;
    let image_selector = parse_selector(IMAGE_SELECTOR)?;

    let document = Html::parse_document(html);

    let name = first_text(&document, &name_selector);
    let description =
        first_text(&document, &description_selector).map(|text| text.replace('\u{a0}', " "));
    let image = first_attr(&document, &image_selector, "src").and_then(|src| resolve_link(base, src));

    Ok(ProductDetails {
        name,
        description,
        image,
    })
}

/// Fetches a stub's detail page and builds its finished record
///
/// Returns [`SkipReason::FetchFailed`] when the page is unavailable; the
/// product is then left out of its category.
pub async fn parse_product<F: PageFetcher>(
    fetcher: &F,
    base: &Url,
    stub: ProductStub,
) -> Result<ProductRecord, SkipReason> {
    tracing::info!("Parsing product {}: {}", stub.identifier, stub.url);

    let html = fetcher
        .fetch(&stub.url)
        .await
        .ok_or_else(|| SkipReason::FetchFailed {
            url: stub.url.clone(),
        })?;

    let details = parse_product_page(&html, base)?;
    if details.name.is_none() {
        tracing::debug!("Product {} has no heading", stub.url);
    }

    Ok(ProductRecord::from_stub(
        stub,
        details.name,
        details.description,
        details.image,
    ))
}
