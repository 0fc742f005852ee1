//! Domain types for line reference data.
//!
//! Datasets are hand-maintained JSON, so parsing is deliberately forgiving
//! about optional fields: anything with the wrong shape is treated as
//! absent. Only structurally unusable files are rejected.

mod dataset;
mod error;
mod lenient;
mod line;
mod manifest;
mod station;
mod version;

pub use dataset::{LineDataset, ProtectionZone, StationRange};
pub use error::DatasetError;
pub use line::{InvalidLineName, LineName};
pub use manifest::Manifest;
pub use station::{LimitSegment, Station, StationLimits};
pub use version::VersionInfo;
