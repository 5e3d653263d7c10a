//! In-memory page fetcher for unit tests

use crate::crawler::fetcher::PageFetcher;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves pages from a map; unknown URLs are unavailable
#[derive(Debug, Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned()
    }
}
