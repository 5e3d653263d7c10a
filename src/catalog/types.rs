use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A purchasable configuration of a product (one size or weight)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Article code of this configuration
    pub article: Option<String>,

    /// Size or weight label as shown by the shop
    pub mass: Option<String>,

    /// Price, kept exactly as the shop published it
    pub price: Option<Number>,
}

/// A minimal product reference found on a catalog page
///
/// Stubs only live between catalog extraction and detail parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductStub {
    /// Shop-side product identifier, never empty
    pub identifier: String,

    /// Absolute URL of the product detail page
    pub url: String,

    /// Variants found in the page's embedded data, in source order
    pub variants: Vec<Variant>,
}

/// A fully enriched product, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub variants: Vec<Variant>,
}

impl ProductRecord {
    /// Builds the record for `stub`, carrying its variants over unchanged
    pub fn from_stub(
        stub: ProductStub,
        name: Option<String>,
        description: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            url: stub.url,
            name,
            description,
            image,
            variants: stub.variants,
        }
    }
}

/// One configured category and every product collected across its pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Page heading, or a name derived from the category URL
    pub name: String,

    /// Products in page-then-document order
    pub goods: Vec<ProductRecord>,
}

impl Category {
    /// Creates a category with no products yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goods: Vec::new(),
        }
    }
}

/// The root artifact of a crawl: categories in configuration order
pub type CrawlResult = Vec<Category>;
