//! JSON document sink
//!
//! Writes the catalog as one pretty-printed JSON array of
//! `{ "name", "goods" }` objects. Non-ASCII text is written verbatim.

use crate::catalog::CrawlResult;
use crate::output::traits::{OutputError, OutputResult, ResultSink};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// [`ResultSink`] that replaces a JSON file atomically
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink writing to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in, so the final rename
    /// stays on one filesystem
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&self, result: &CrawlResult) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(result)?;

        let mut staged = NamedTempFile::new_in(self.staging_dir())?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        match_permissions(staged.as_file(), &self.path)?;

        staged.persist(&self.path).map_err(|e| OutputError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::info!(
            "Saved {} categories to {}",
            result.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Gives the staged file the mode of the file it replaces, or 0644 for a
/// new document, instead of the owner-only mode temp files are created with
#[cfg(unix)]
fn match_permissions(staged: &std::fs::File, destination: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = match std::fs::metadata(destination) {
        Ok(meta) if meta.is_file() => meta.permissions().mode() & 0o7777,
        _ => 0o644,
    };
    staged.set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn match_permissions(_staged: &std::fs::File, _destination: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Reads a document written by [`JsonFileSink`]
pub fn load_result(path: &Path) -> OutputResult<CrawlResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
