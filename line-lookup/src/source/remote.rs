//! Reference data fetched over HTTP.

use std::time::Duration;

use tracing::debug;

use super::error::SourceError;

/// Configuration for a remote data source.
#[derive(Debug, Clone)]
pub struct RemoteSourceConfig {
    /// URL of the data directory (the one holding `manifest.json`)
    pub base_url: String,
    /// URL of the version file
    pub version_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteSourceConfig {
    /// Create a config for the given data directory URL.
    ///
    /// The version file defaults to `version.json` inside the same directory.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            version_url: format!("{base_url}/version.json"),
            base_url,
            timeout_secs: 30,
        }
    }

    /// Set a custom version file URL.
    pub fn with_version_url(mut self, url: impl Into<String>) -> Self {
        self.version_url = url.into();
        self
    }
}

/// Fetches reference data files from a web server.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http: reqwest::Client,
    base_url: String,
    version_url: String,
}

impl RemoteSource {
    /// Create a new remote source.
    pub fn new(config: RemoteSourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            version_url: config.version_url,
        })
    }

    /// Fetch a file from the data directory.
    pub async fn read_data(&self, file_name: &str) -> Result<String, SourceError> {
        let url = format!("{}/{}", self.base_url, file_name);
        self.get(&url, file_name).await
    }

    /// Fetch the version file.
    pub async fn read_version(&self) -> Result<String, SourceError> {
        self.get(&self.version_url, "version file").await
    }

    async fn get(&self, url: &str, what: &str) -> Result<String, SourceError> {
        debug!(url, "fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                what: what.to_string(),
            });
        }

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
