//! Published data version.

use serde::{Deserialize, Serialize};

/// Version shown when `version.json` cannot be loaded.
const OFFLINE_VERSION: &str = "Offline";

/// Contents of `version.json`, written by the `bump-version` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version string, e.g. "v1.0.4".
    pub version: String,

    /// When the version was published, preformatted for display.
    #[serde(default)]
    pub updated: String,
}

impl VersionInfo {
    /// Placeholder used when the version file is unavailable.
    pub fn offline() -> Self {
        Self {
            version: OFFLINE_VERSION.to_string(),
            updated: String::new(),
        }
    }

    /// Whether this is the offline placeholder.
    pub fn is_offline(&self) -> bool {
        self.version == OFFLINE_VERSION && self.updated.is_empty()
    }

    /// Footer label, e.g. "v1.0.4 (updated 19 Oct 2026, 3:04 pm)".
    pub fn label(&self) -> String {
        if self.updated.is_empty() {
            self.version.clone()
        } else {
            format!("{} (updated {})", self.version, self.updated)
        }
    }
}
