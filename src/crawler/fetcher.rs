//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured client identity
//! - GET requests for listing and product pages
//! - Error classification for logging
//!
//! Transport failures never escape: [`PageFetcher::fetch`] logs them and
//! returns `None`, leaving the fallback decision to the caller.

use crate::config::FetcherConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Source of raw page content
///
/// One request is in flight at a time; the crawler awaits every fetch
/// before issuing the next one.
pub trait PageFetcher {
    /// Fetches `url`, returning the body or `None` on any failure
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>> + Send;
}

impl<F: PageFetcher> PageFetcher for &F {
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>> + Send {
        (**self).fetch(url)
    }
}

/// Classified fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use shop_sweep::config::FetcherConfig;
/// use shop_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// Any non-success status is an error; redirects are followed by the client.
/// There are no retries here.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if e.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                message: e.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    pause: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the fetcher configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            pause: Duration::from_millis(config.request_pause_ms),
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }

        tracing::debug!(url, "Fetching page");
        match fetch_page(&self.client, url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!(url, error = %e, "Fetch failed");
                None
            }
        }
    }
}
