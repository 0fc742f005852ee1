//! Bump the published version.
//!
//! Usage: `bump-version [MANIFEST] [VERSION_FILE]`, defaulting to
//! `static/manifest.json` and `version.json`.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use line_lookup::release::release;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let manifest = PathBuf::from(args.next().unwrap_or_else(|| "static/manifest.json".into()));
    let version_file = PathBuf::from(args.next().unwrap_or_else(|| "version.json".into()));

    match release(&manifest, &version_file, &Local::now()) {
        Ok(info) => {
            info!(
                version = %info.version,
                updated = %info.updated,
                manifest = %manifest.display(),
                version_file = %version_file.display(),
                "bumped version"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "version bump failed");
            ExitCode::FAILURE
        }
    }
}
