//! Station records as they appear in a line dataset.

use serde::Deserialize;

use super::lenient::{lenient, lenient_text};

/// A station on a line.
///
/// Only `name` is required. Every other field is optional free text that
/// the dataset authors fill in as information becomes available.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Station {
    /// Station name, unique within its line.
    pub name: String,

    /// Signaller responsible for the station area.
    #[serde(default, deserialize_with = "lenient_text")]
    pub signaller: Option<String>,

    /// Whether (and how) communications are recorded.
    #[serde(default, deserialize_with = "lenient_text")]
    pub recorded: Option<String>,

    /// Caution order notes.
    #[serde(default, deserialize_with = "lenient_text")]
    pub caution_orders: Option<String>,

    /// Driver points of interest.
    #[serde(default, deserialize_with = "lenient_text")]
    pub driver_points: Option<String>,

    /// Longer description shown beneath the station facts.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    /// Station limits in each direction.
    #[serde(default, deserialize_with = "lenient")]
    pub station_limits: StationLimits,
}

impl Station {
    /// Create a station with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signaller: None,
            recorded: None,
            caution_orders: None,
            driver_points: None,
            description: None,
            station_limits: StationLimits::default(),
        }
    }
}

/// One segment of a station limit: the signals or markers bounding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LimitSegment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub to: Option<String>,
}

/// Station limits for the Up and Down directions.
///
/// The dataset may give each direction as a single `{from, to}` record or
/// as a list of them; both are normalized to a list here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawStationLimits")]
pub struct StationLimits {
    pub up: Vec<LimitSegment>,
    pub down: Vec<LimitSegment>,
}

impl StationLimits {
    /// True when neither direction has any segment.
    pub fn is_empty(&self) -> bool {
        self.up.is_empty() && self.down.is_empty()
    }
}

#[derive(Deserialize)]
struct RawStationLimits {
    #[serde(rename = "Up", alias = "up", default, deserialize_with = "lenient")]
    up: OneOrMany,
    #[serde(rename = "Down", alias = "down", default, deserialize_with = "lenient")]
    down: OneOrMany,
}

// `Many` is listed first: a derived struct also accepts a JSON array.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<LimitSegment>),
    One(LimitSegment),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl From<OneOrMany> for Vec<LimitSegment> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(segment) => vec![segment],
            OneOrMany::Many(segments) => segments,
        }
    }
}

impl From<RawStationLimits> for StationLimits {
    fn from(raw: RawStationLimits) -> Self {
        Self {
            up: raw.up.into(),
            down: raw.down.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_station() {
        let station: Station = serde_json::from_str(r#"{"name": "Caulfield"}"#).unwrap();
        assert_eq!(station, Station::named("Caulfield"));
        assert!(station.station_limits.is_empty());
    }

    #[test]
    fn free_text_fields() {
        let station: Station = serde_json::from_str(
            r#"{
                "name": "Richmond",
                "signaller": "Metrol Board 3",
                "recorded": "Yes",
                "caution_orders": "",
                "driver_points": "Platform 6 stop board"
            }"#,
        )
        .unwrap();

        assert_eq!(station.signaller.as_deref(), Some("Metrol Board 3"));
        assert_eq!(station.recorded.as_deref(), Some("Yes"));
        assert_eq!(station.caution_orders, None);
        assert_eq!(
            station.driver_points.as_deref(),
            Some("Platform 6 stop board")
        );
        assert_eq!(station.description, None);
    }

    #[test]
    fn single_limit_record_becomes_one_element_list() {
        let station: Station = serde_json::from_str(
            r#"{
                "name": "Moorabbin",
                "station_limits": {
                    "Up": {"from": "MRN 12", "to": "MRN 14"},
                    "Down": [{"from": "MRN 9", "to": "MRN 11"}, {"from": "MRN 3"}]
                }
            }"#,
        )
        .unwrap();

        let limits = &station.station_limits;
        assert_eq!(limits.up.len(), 1);
        assert_eq!(limits.up[0].from.as_deref(), Some("MRN 12"));
        assert_eq!(limits.down.len(), 2);
        assert_eq!(limits.down[1].to, None);
    }

    #[test]
    fn one_direction_only() {
        let station: Station = serde_json::from_str(
            r#"{"name": "Frankston", "station_limits": {"Down": {"from": "FSN 2", "to": "FSN 4"}}}"#,
        )
        .unwrap();

        assert!(station.station_limits.up.is_empty());
        assert_eq!(station.station_limits.down.len(), 1);
    }

    #[test]
    fn malformed_limits_are_ignored() {
        let station: Station =
            serde_json::from_str(r#"{"name": "Cheltenham", "station_limits": "see diagram"}"#)
                .unwrap();
        assert!(station.station_limits.is_empty());
    }

    #[test]
    fn missing_name_is_an_error() {
        let result: Result<Station, _> = serde_json::from_str(r#"{"signaller": "Box 1"}"#);
        assert!(result.is_err());
    }
}
