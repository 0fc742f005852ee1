//! Version-tagged static asset cache.
//!
//! Assets are served cache-first. The cache belongs to a single generation
//! (the published data version); when the generation changes, every entry
//! is dropped and the precache list is loaded again. Assets outside the
//! precache list are read from disk on each request and never written back.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use futures::future::join_all;
use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Files loaded into the cache when a generation is installed.
const DEFAULT_PRECACHE: &[&str] = &["style.css", "manifest.json", "icon.svg"];

/// Configuration for the asset cache.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory holding the static assets.
    pub root: PathBuf,

    /// Paths (relative to `root`) loaded on install.
    pub precache: Vec<String>,

    /// Maximum number of cached assets.
    pub max_capacity: u64,
}

impl AssetConfig {
    /// Create a config for the given asset directory with the default precache list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            precache: DEFAULT_PRECACHE.iter().map(|s| s.to_string()).collect(),
            max_capacity: 256,
        }
    }

    /// Replace the precache list.
    pub fn with_precache(mut self, precache: Vec<String>) -> Self {
        self.precache = precache;
        self
    }
}

/// A static asset ready to serve.
#[derive(Debug, Clone)]
pub struct Asset {
    pub body: Bytes,
    pub content_type: &'static str,
    /// Generation the asset was loaded under; used as its ETag.
    pub generation: Arc<str>,
}

impl Asset {
    /// Quoted ETag header value.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.generation)
    }
}

/// Cache-first asset store.
pub struct AssetCache {
    root: PathBuf,
    precache: Vec<String>,
    entries: MokaCache<String, Arc<Asset>>,
    generation: RwLock<Arc<str>>,
}

impl AssetCache {
    /// Create an empty cache. Call [`install`](Self::install) to populate it.
    pub fn new(config: AssetConfig) -> Self {
        Self {
            root: config.root,
            precache: config.precache,
            entries: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
            generation: RwLock::new(Arc::from("")),
        }
    }

    /// The active generation.
    pub async fn generation(&self) -> Arc<str> {
        self.generation.read().await.clone()
    }

    /// Install a generation: load every precache file.
    ///
    /// Missing precache files are skipped with a warning. Returns the number
    /// of files cached.
    pub async fn install(&self, generation: &str) -> usize {
        let mut current = self.generation.write().await;
        *current = Arc::from(generation);
        self.precache_all(current.clone()).await
    }

    /// Switch to a new generation, replacing the whole cache.
    ///
    /// Returns false (and changes nothing) if `generation` is already active.
    pub async fn activate(&self, generation: &str) -> bool {
        let mut current = self.generation.write().await;
        if &**current == generation {
            return false;
        }

        let previous = current.clone();
        info!(from = %previous, to = generation, "activating asset generation");
        self.entries.invalidate_all();
        *current = Arc::from(generation);
        self.precache_all(current.clone()).await;
        true
    }

    /// Look up an asset, falling back to disk on a miss.
    ///
    /// Returns `None` for unknown files and for paths that escape the asset
    /// directory.
    pub async fn get(&self, path: &str) -> Option<Arc<Asset>> {
        let relative = sanitize(path)?;
        let key = key_for(&relative);

        if let Some(asset) = self.entries.get(&key).await {
            return Some(asset);
        }

        let generation = self.generation().await;
        load(&self.root, &relative, generation).await.map(Arc::new)
    }

    #[cfg(test)]
    fn is_cached(&self, path: &str) -> bool {
        sanitize(path).is_some_and(|p| self.entries.contains_key(&key_for(&p)))
    }

    async fn precache_all(&self, generation: Arc<str>) -> usize {
        let loads = self.precache.iter().filter_map(|path| {
            let Some(relative) = sanitize(path) else {
                warn!(path = %path, "ignoring invalid precache path");
                return None;
            };
            let generation = generation.clone();
            Some(async move {
                let asset = load(&self.root, &relative, generation).await;
                (key_for(&relative), asset)
            })
        });

        let mut installed = 0;
        for (key, asset) in join_all(loads).await {
            match asset {
                Some(asset) => {
                    self.entries.insert(key, Arc::new(asset)).await;
                    installed += 1;
                }
                None => warn!(path = %key, "precache file missing"),
            }
        }

        info!(generation = %generation, installed, "asset cache installed");
        installed
    }
}

/// Reduce a request path to a relative path inside the asset directory.
fn sanitize(path: &str) -> Option<PathBuf> {
    let path = Path::new(path.trim_start_matches('/'));
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

fn key_for(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}

async fn load(root: &Path, relative: &Path, generation: Arc<str>) -> Option<Asset> {
    let full = root.join(relative);
    match tokio::fs::read(&full).await {
        Ok(bytes) => Some(Asset {
            body: Bytes::from(bytes),
            content_type: content_type(relative),
            generation,
        }),
        Err(e) => {
            debug!(path = %full.display(), error = %e, "asset not readable");
            None
        }
    }
}

/// Content type from the file extension.
fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
