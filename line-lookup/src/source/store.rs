//! Parsed dataset cache.
//!
//! A dataset is parsed once and shared until its entry expires or the
//! data version changes, whichever comes first. Failed loads are never
//! cached, so re-selecting a line retries it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use crate::domain::{LineDataset, LineName, Manifest, VersionInfo};

use super::DataSource;
use super::error::SourceError;
use super::local::MANIFEST_FILE;

/// Configuration for the dataset cache.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// TTL for cached datasets.
    pub ttl: Duration,

    /// Maximum number of cached datasets.
    pub max_capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 64,
        }
    }
}

/// Reference data access with dataset caching.
pub struct LineStore {
    source: DataSource,
    datasets: MokaCache<LineName, Arc<LineDataset>>,
    /// Bumped on every invalidation.
    generation: AtomicU64,
}

impl LineStore {
    /// Create a new store over the given source.
    pub fn new(source: DataSource, config: &StoreConfig) -> Self {
        let datasets = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            source,
            datasets,
            generation: AtomicU64::new(0),
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Load the manifest. Never cached.
    pub async fn manifest(&self) -> Result<Manifest, SourceError> {
        let body = self.source.read_data(MANIFEST_FILE).await?;
        Ok(Manifest::from_json(&body)?)
    }

    /// Load a line dataset, using the cache if available.
    ///
    /// Only lines listed in the manifest can be loaded; any other name is
    /// [`SourceError::NotFound`].
    pub async fn dataset(&self, line: &LineName) -> Result<Arc<LineDataset>, SourceError> {
        if let Some(cached) = self.datasets.get(line).await {
            return Ok(cached);
        }

        let generation = self.generation.load(Ordering::Acquire);
        if !self.manifest().await?.lines().contains(line) {
            return Err(SourceError::NotFound {
                what: format!("{} line", line.display_name()),
            });
        }

        let body = self.source.read_data(&line.file_name()).await?;
        let dataset = Arc::new(LineDataset::from_json(line.clone(), &body)?);
        debug!(line = %line, stations = dataset.stations.len(), "loaded dataset");

        self.cache(line, dataset.clone(), generation).await;
        Ok(dataset)
    }

    /// Cache a dataset read under `generation`.
    ///
    /// An invalidation since the read started means the dataset may be from
    /// the previous version, so it is dropped again.
    async fn cache(&self, line: &LineName, dataset: Arc<LineDataset>, generation: u64) {
        self.datasets.insert(line.clone(), dataset).await;
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(line = %line, "data version changed during load, not caching");
            self.datasets.invalidate(line).await;
        }
    }

    /// Load the published version.
    pub async fn version(&self) -> Result<VersionInfo, SourceError> {
        let body = self.source.read_version().await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            what: "version file".to_string(),
            message: e.to_string(),
        })
    }

    /// Drop every cached dataset.
    pub fn invalidate(&self) {
        info!("invalidating cached datasets");
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.datasets.invalidate_all();
    }
}
