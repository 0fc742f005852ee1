//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::assets::AssetCache;
use crate::domain::VersionInfo;
use crate::source::{LineStore, SourceError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Reference data with dataset caching
    pub store: Arc<LineStore>,

    /// Static asset cache
    pub assets: Arc<AssetCache>,

    /// Currently published version
    pub version: Arc<RwLock<VersionInfo>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: LineStore, assets: AssetCache, version: VersionInfo) -> Self {
        Self {
            store: Arc::new(store),
            assets: Arc::new(assets),
            version: Arc::new(RwLock::new(version)),
        }
    }

    /// The version currently shown to users.
    pub async fn current_version(&self) -> VersionInfo {
        self.version.read().await.clone()
    }

    /// Re-read the version file and roll caches over if it changed.
    ///
    /// On failure the current version is kept. Returns whether a new
    /// version was activated.
    pub async fn refresh_version(&self) -> Result<bool, SourceError> {
        let latest = match self.store.version().await {
            Ok(latest) => latest,
            Err(e) => {
                warn!(error = %e, "version check failed");
                return Err(e);
            }
        };

        {
            let mut current = self.version.write().await;
            if current.version == latest.version {
                return Ok(false);
            }
            info!(from = %current.version, to = %latest.version, "new data version");
            *current = latest.clone();
        }

        self.store.invalidate();
        self.assets.activate(&latest.version).await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetConfig;
    use crate::domain::LineName;
    use crate::source::{DataSource, LocalSource, StoreConfig};
    use tempfile::{TempDir, tempdir};

    fn write_version(dir: &TempDir, version: &str) {
        std::fs::write(
            dir.path().join("version.json"),
            format!(r#"{{"version": "{version}", "updated": "19 Oct 2026, 3:04 pm"}}"#),
        )
        .unwrap();
    }

    async fn state_in(dir: &TempDir) -> AppState {
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
        std::fs::write(
            dir.path().join("manifest.json"),
            r#"{"files": ["frankston.json"]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("frankston.json"),
            r#"{"stations": [{"name": "A"}]}"#,
        )
        .unwrap();
        write_version(dir, "v1.0.0");

        let source = LocalSource::new(dir.path(), dir.path().join("version.json"));
        let store = LineStore::new(DataSource::Local(source), &StoreConfig::default());
        let version = store.version().await.unwrap();

        let assets = AssetCache::new(
            AssetConfig::new(dir.path()).with_precache(vec!["style.css".into()]),
        );
        assets.install(&version.version).await;
        AppState::new(store, assets, version)
    }

    #[tokio::test]
    async fn unchanged_version_keeps_caches() {
        let dir = tempdir().unwrap();
        let state = state_in(&dir).await;

        assert!(!state.refresh_version().await.unwrap());
        assert_eq!(&*state.assets.generation().await, "v1.0.0");
    }

    #[tokio::test]
    async fn new_version_rolls_caches_over() {
        let dir = tempdir().unwrap();
        let state = state_in(&dir).await;
        let line = LineName::parse("frankston").unwrap();
        state.store.dataset(&line).await.unwrap();

        std::fs::write(
            dir.path().join("frankston.json"),
            r#"{"stations": [{"name": "A"}, {"name": "B"}]}"#,
        )
        .unwrap();
        write_version(&dir, "v1.0.1");

        assert!(state.refresh_version().await.unwrap());
        assert_eq!(state.current_version().await.version, "v1.0.1");
        assert_eq!(&*state.assets.generation().await, "v1.0.1");
        assert_eq!(state.store.dataset(&line).await.unwrap().stations.len(), 2);
    }

    #[tokio::test]
    async fn failed_check_keeps_current_version() {
        let dir = tempdir().unwrap();
        let state = state_in(&dir).await;
        std::fs::remove_file(dir.path().join("version.json")).unwrap();

        assert!(state.refresh_version().await.is_err());
        assert_eq!(state.current_version().await.version, "v1.0.0");
    }
}
