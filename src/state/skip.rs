//! Skip reasons for units of work that were left out of a crawl
//!
//! Every crawl stage returns `Result<T, SkipReason>`. A skip never aborts
//! the parent loop; it only removes that unit's contribution from the result.
use std::fmt;
use thiserror::Error;

/// Why a category, page, stub, or product was omitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The page could not be fetched (transport failure or error status)
    #[error("could not fetch {url}")]
    FetchFailed { url: String },

    /// A listing element had no usable link
    #[error("product element has no link")]
    MissingLink,

    /// A listing element had no recoverable product identifier
    #[error("product element for {url} has no identifier")]
    MissingIdentifier { url: String },

    /// A configured or discovered URL could not be parsed
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// A CSS selector failed to compile
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

impl SkipReason {
    /// Short, stable label used for counting and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "fetch_failed",
            Self::MissingLink => "missing_link",
            Self::MissingIdentifier { .. } => "missing_identifier",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Selector { .. } => "selector",
        }
    }

    /// Returns true for skips that are expected in normal listings
    ///
    /// Elements without a link or identifier are dropped silently; everything
    /// else indicates a transport or structural problem.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingLink | Self::MissingIdentifier { .. })
    }
}

/// The granularity at which a skip happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipScope {
    Category,
    Page,
    Stub,
    Product,
}

impl SkipScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Page => "page",
            Self::Stub => "stub",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for SkipScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
