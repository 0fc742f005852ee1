use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use line_lookup::assets::{AssetCache, AssetConfig};
use line_lookup::config::{DataLocation, ServerConfig};
use line_lookup::domain::VersionInfo;
use line_lookup::source::{
    DataSource, LineStore, LocalSource, RemoteSource, RemoteSourceConfig, StoreConfig,
};
use line_lookup::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("line_lookup=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let source = match &config.data {
        DataLocation::Local {
            data_dir,
            version_file,
        } => DataSource::Local(LocalSource::new(data_dir, version_file)),
        DataLocation::Remote {
            base_url,
            version_url,
        } => {
            let mut remote = RemoteSourceConfig::new(base_url);
            if let Some(url) = version_url {
                remote = remote.with_version_url(url);
            }
            match RemoteSource::new(remote) {
                Ok(source) => DataSource::Remote(source),
                Err(e) => {
                    error!(error = %e, "failed to create HTTP client");
                    return ExitCode::FAILURE;
                }
            }
        }
    };
    let store = LineStore::new(source, &StoreConfig::default());

    // The lookup still works without a version file; the footer says so.
    let version = match store.version().await {
        Ok(version) => version,
        Err(e) => {
            warn!(error = %e, "version unavailable, running offline");
            VersionInfo::offline()
        }
    };

    let assets = AssetCache::new(AssetConfig::new(&config.static_dir));
    let cached = assets.install(&version.version).await;
    info!(version = %version.version, assets = cached, "installed static assets");

    let state = AppState::new(store, assets, version);
    spawn_version_poll(state.clone(), config.version_poll);

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("Line lookup listening on http://{}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Check the version file periodically and roll caches over on a new release.
fn spawn_version_poll(state: AppState, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Ok(true) = state.refresh_version().await {
                let current = state.current_version().await;
                info!(version = %current.version, "activated new version");
            }
        }
    });
}
