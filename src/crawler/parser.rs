//! Shared HTML helpers for the page extractors
//!
//! The extractors only differ in which elements they look at; selector
//! compilation and text flattening live here.

use crate::state::SkipReason;
use scraper::{ElementRef, Html, Selector};

/// Compiles a CSS selector, reporting failure as a skip
pub fn parse_selector(css: &str) -> Result<Selector, SkipReason> {
    Selector::parse(css).map_err(|e| SkipReason::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Flattens an element's text
///
/// Each descendant text node is trimmed, empty nodes are dropped and the rest
/// are joined with single spaces. Returns `None` when nothing is left.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Returns the flattened text of the first element matching `selector`
pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}

/// Returns an attribute of the first element matching `selector`
pub fn first_attr<'a>(document: &'a Html, selector: &Selector, attr: &str) -> Option<&'a str> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
}
