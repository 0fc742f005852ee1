//! The manifest listing available lines.

use serde::Deserialize;
use tracing::warn;

use super::error::DatasetError;
use super::line::LineName;

/// Contents of `data/manifest.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Dataset file names, e.g. `frankston.json`.
    pub files: Vec<String>,
}

impl Manifest {
    /// Parse a manifest file.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(|e| DatasetError::MalformedManifest(e.to_string()))
    }

    /// Lines in manifest order.
    ///
    /// Entries that cannot name a line are skipped with a warning.
    pub fn lines(&self) -> Vec<LineName> {
        self.files
            .iter()
            .filter_map(|file| match LineName::from_file_name(file) {
                Ok(line) => Some(line),
                Err(e) => {
                    warn!(file = %file, error = %e, "skipping manifest entry");
                    None
                }
            })
            .collect()
    }
}
