//! Result sink trait and output errors

use crate::catalog::CrawlResult;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize crawl result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Durable destination for a finished crawl
///
/// Called once per run with the complete result. Implementations must not
/// leave a partially written document behind when they fail.
pub trait ResultSink {
    /// Persists the crawl result
    ///
    /// # Arguments
    ///
    /// * `result` - Every crawled category, in configuration order
    fn persist(&self, result: &CrawlResult) -> OutputResult<()>;
}
