//! Reference data read from a local directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::SourceError;

/// Default manifest file name inside the data directory.
pub(crate) const MANIFEST_FILE: &str = "manifest.json";

/// Reads the manifest, line datasets and version file from disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    data_dir: PathBuf,
    version_file: PathBuf,
}

impl LocalSource {
    /// Create a source rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, version_file: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            version_file: version_file.into(),
        }
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read a file from the data directory.
    pub async fn read_data(&self, file_name: &str) -> Result<String, SourceError> {
        read(&self.data_dir.join(file_name), file_name).await
    }

    /// Read the version file.
    pub async fn read_version(&self) -> Result<String, SourceError> {
        read(&self.version_file, "version file").await
    }
}

async fn read(path: &Path, what: &str) -> Result<String, SourceError> {
    debug!(path = %path.display(), "reading");
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            SourceError::NotFound {
                what: what.to_string(),
            }
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}
