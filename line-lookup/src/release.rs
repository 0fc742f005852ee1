//! Release version bumping.
//!
//! A release bumps the patch number in the web app manifest and writes a
//! matching `version.json`, which the server polls to detect new data.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde_json::Value;

use crate::domain::VersionInfo;

/// Version assumed when the manifest has none.
const INITIAL_VERSION: &str = "1.0.0";

/// Errors from the version bump.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// Reading or writing a file failed
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not a JSON object
    #[error("invalid JSON in {path}: {message}")]
    Json { path: PathBuf, message: String },

    /// The current version has a non-numeric part
    #[error("cannot bump version {0:?}")]
    InvalidVersion(String),
}

/// Increment the patch number of `current`, e.g. `v1.2.3` → `v1.2.4`.
///
/// A leading `v`/`V` is optional. `None` starts from 1.0.0. Missing minor or
/// patch parts count as zero.
pub fn bump_patch(current: Option<&str>) -> Result<String, ReleaseError> {
    let raw = current
        .map(|v| v.trim_start_matches(['v', 'V']))
        .filter(|v| !v.is_empty())
        .unwrap_or(INITIAL_VERSION);

    let mut parts = raw
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ReleaseError::InvalidVersion(raw.to_string()))?;

    if parts.len() < 3 {
        parts.resize(3, 0);
    }
    parts[2] = parts[2]
        .checked_add(1)
        .ok_or_else(|| ReleaseError::InvalidVersion(raw.to_string()))?;

    let joined = parts
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Ok(format!("v{joined}"))
}

/// Display form of the release time, e.g. "19 Oct 2026, 3:04 pm".
pub fn display_timestamp(at: &DateTime<Local>) -> String {
    at.format("%-d %b %Y, %-I:%M %P").to_string()
}

/// Bump the version stored in a web app manifest file.
///
/// Sets `version` and an ISO-8601 `updated` timestamp, keeping every other
/// key. Returns the new version.
pub fn bump_manifest(path: &Path, now: &DateTime<Local>) -> Result<String, ReleaseError> {
    let body = std::fs::read_to_string(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json_error = |message: String| ReleaseError::Json {
        path: path.to_path_buf(),
        message,
    };

    let mut manifest: Value = serde_json::from_str(&body).map_err(|e| json_error(e.to_string()))?;
    let Some(fields) = manifest.as_object_mut() else {
        return Err(json_error("expected an object".to_string()));
    };

    let version = bump_patch(fields.get("version").and_then(Value::as_str))?;
    fields.insert("version".into(), Value::String(version.clone()));
    fields.insert(
        "updated".into(),
        Value::String(
            now.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    );

    write_json(path, &manifest)?;
    Ok(version)
}

/// Write `version.json` for the given version.
pub fn write_version_file(
    path: &Path,
    version: &str,
    now: &DateTime<Local>,
) -> Result<VersionInfo, ReleaseError> {
    let info = VersionInfo {
        version: version.to_string(),
        updated: display_timestamp(now),
    };
    write_json(path, &info)?;
    Ok(info)
}

/// Bump the manifest and write the version file in one step.
pub fn release(
    manifest: &Path,
    version_file: &Path,
    now: &DateTime<Local>,
) -> Result<VersionInfo, ReleaseError> {
    let version = bump_manifest(manifest, now)?;
    write_version_file(version_file, &version, now)
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<(), ReleaseError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ReleaseError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}
