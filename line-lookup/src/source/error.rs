//! Data source error types.

use std::path::PathBuf;

use crate::domain::DatasetError;

/// Errors that can occur while loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested file does not exist
    #[error("{what} not found")]
    NotFound { what: String },

    /// Reading a local file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote host returned an error status
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Version file could not be parsed
    #[error("JSON parse error in {what}: {message}")]
    Json { what: String, message: String },

    /// The file was fetched but is structurally unusable
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl SourceError {
    /// Whether the error means the file simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }

    /// Whether the data was fetched but could not be interpreted.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::Dataset(_) | SourceError::Json { .. })
    }
}
