//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default interval between version checks (5 minutes).
const DEFAULT_VERSION_POLL_SECS: u64 = 5 * 60;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where line data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    /// A directory on disk, plus the version file path.
    Local {
        data_dir: PathBuf,
        version_file: PathBuf,
    },
    /// A web server; `version_url` defaults to `version.json` beside the data.
    Remote {
        base_url: String,
        version_url: Option<String>,
    },
}

/// Configuration for the lookup server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Source of the manifest, datasets and version file.
    pub data: DataLocation,

    /// Directory of static assets.
    pub static_dir: PathBuf,

    /// How often to check the version file for a new release.
    pub version_poll: Duration,
}

impl ServerConfig {
    /// Read configuration from `LINE_LOOKUP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_value = get("LINE_LOOKUP_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value.parse().map_err(|_| ConfigError::Invalid {
            var: "LINE_LOOKUP_ADDR",
            value: addr_value.clone(),
        })?;

        let data = match get("LINE_LOOKUP_DATA_URL") {
            Some(base_url) => DataLocation::Remote {
                base_url,
                version_url: get("LINE_LOOKUP_VERSION_URL"),
            },
            None => DataLocation::Local {
                data_dir: get("LINE_LOOKUP_DATA_DIR")
                    .unwrap_or_else(|| "data".to_string())
                    .into(),
                version_file: get("LINE_LOOKUP_VERSION_FILE")
                    .unwrap_or_else(|| "version.json".to_string())
                    .into(),
            },
        };

        let static_dir = get("LINE_LOOKUP_STATIC_DIR")
            .unwrap_or_else(|| "static".to_string())
            .into();

        let version_poll = match get("LINE_LOOKUP_VERSION_POLL_SECS") {
            Some(value) => {
                let secs: u64 = value.parse().map_err(|_| ConfigError::Invalid {
                    var: "LINE_LOOKUP_VERSION_POLL_SECS",
                    value: value.clone(),
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => Duration::from_secs(DEFAULT_VERSION_POLL_SECS),
        };

        Ok(Self {
            addr,
            data,
            static_dir,
            version_poll,
        })
    }
}
