//! Per-line datasets.

use serde::Deserialize;

use super::error::DatasetError;
use super::lenient::{lenient, lenient_seq, lenient_text};
use super::line::LineName;
use super::station::Station;

/// A range of stations given by its two endpoint names, inclusive.
///
/// The dataset writes ranges as two-element arrays (`["Caulfield",
/// "Moorabbin"]`). Either endpoint may be missing, in which case the range
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Option<String>>")]
pub struct StationRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl StationRange {
    /// Create a range between two named stations.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

impl From<Vec<Option<String>>> for StationRange {
    fn from(endpoints: Vec<Option<String>>) -> Self {
        let mut endpoints = endpoints.into_iter();
        Self {
            start: endpoints.next().flatten(),
            end: endpoints.next().flatten(),
        }
    }
}

/// A track force protection zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtectionZone {
    /// Zone type label, e.g. "TFP Zone A".
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub zone_type: Option<String>,

    /// Stations covered by the zone.
    #[serde(default, deserialize_with = "lenient")]
    pub range: StationRange,
}

/// Wire shape of a `data/<line>.json` file.
#[derive(Deserialize)]
struct DatasetFile {
    stations: Vec<Station>,
    #[serde(default, deserialize_with = "lenient_seq")]
    terminating: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    stabling: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    high_beam_range: Option<StationRange>,
    #[serde(default, deserialize_with = "lenient_seq")]
    track_force_protection_zones: Vec<ProtectionZone>,
}

/// Everything known about one line.
///
/// Station order is meaningful: range checks (high beam, protection zones)
/// are evaluated by position in `stations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDataset {
    pub line: LineName,
    pub stations: Vec<Station>,
    pub terminating: Vec<String>,
    pub stabling: Vec<String>,
    pub high_beam_range: Option<StationRange>,
    pub protection_zones: Vec<ProtectionZone>,
}

impl LineDataset {
    /// Create a dataset with stations only.
    pub fn new(line: LineName, stations: Vec<Station>) -> Self {
        Self {
            line,
            stations,
            terminating: Vec::new(),
            stabling: Vec::new(),
            high_beam_range: None,
            protection_zones: Vec::new(),
        }
    }

    /// Parse a dataset file.
    ///
    /// Optional sections with the wrong shape are treated as absent. A file
    /// that is not an object with a `stations` sequence is malformed.
    pub fn from_json(line: LineName, json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile =
            serde_json::from_str(json).map_err(|e| DatasetError::Malformed {
                line: line.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            line,
            stations: file.stations,
            terminating: file.terminating,
            stabling: file.stabling,
            high_beam_range: file.high_beam_range,
            protection_zones: file.track_force_protection_zones,
        })
    }

    /// Find a station by its exact name.
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Station names in line order.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.name.as_str())
    }
}
