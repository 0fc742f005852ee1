//! Loading reference data.
//!
//! The manifest, per-line datasets and the version file are read either
//! from a local directory or from a remote web server. [`LineStore`] sits on
//! top and keeps recently parsed datasets in memory.

mod error;
mod local;
mod remote;
mod store;

pub use error::SourceError;
pub use local::LocalSource;
pub use remote::{RemoteSource, RemoteSourceConfig};
pub use store::{LineStore, StoreConfig};

/// Where reference data comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Local(LocalSource),
    Remote(RemoteSource),
}

impl DataSource {
    /// Read a file from the data directory.
    pub async fn read_data(&self, file_name: &str) -> Result<String, SourceError> {
        match self {
            DataSource::Local(source) => source.read_data(file_name).await,
            DataSource::Remote(source) => source.read_data(file_name).await,
        }
    }

    /// Read the version file.
    pub async fn read_version(&self) -> Result<String, SourceError> {
        match self {
            DataSource::Local(source) => source.read_version().await,
            DataSource::Remote(source) => source.read_version().await,
        }
    }
}
