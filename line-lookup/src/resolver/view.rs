//! Resolver output.
//!
//! These types are recomputed on every request and never stored. They are
//! serialized as-is for JSON clients and turned into display nodes for HTML.

use serde::Serialize;

/// Placeholder for a missing limit endpoint.
pub const MISSING: &str = "—";

/// Which line-wide lists to include alongside (or instead of) a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DisplayOptions {
    pub show_terminating: bool,
    pub show_stabling: bool,
}

impl DisplayOptions {
    pub fn new(show_terminating: bool, show_stabling: bool) -> Self {
        Self {
            show_terminating,
            show_stabling,
        }
    }
}

/// Everything to show for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedView {
    /// The selected station, if any.
    pub station: Option<StationView>,

    /// Terminating locations, verbatim from the dataset, when requested.
    pub terminating: Option<Vec<String>>,

    /// Stabling locations, verbatim from the dataset, when requested.
    pub stabling: Option<Vec<String>>,
}

/// Facts about a single station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationView {
    pub name: String,
    pub signaller: Option<String>,
    pub recorded: Option<String>,
    pub caution_orders: Option<String>,
    pub driver_points: Option<String>,
    pub description: Option<String>,
    pub flags: StationFlags,
    /// Station limits, absent when the dataset gives none.
    pub limits: Option<LimitsView>,
}

/// Flags derived from the line dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationFlags {
    pub terminating: bool,
    pub stabling: bool,
    pub high_beam: bool,
    /// The first protection zone containing the station.
    pub protection_zone: Option<ZoneMatch>,
}

impl StationFlags {
    pub fn in_protection_zone(&self) -> bool {
        self.protection_zone.is_some()
    }
}

/// A protection zone containing the station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneMatch {
    /// Position of the zone in the dataset's zone list.
    pub index: usize,
    /// The zone's type label, if it has one.
    pub zone_type: Option<String>,
}

/// Station limits with missing endpoints already replaced by [`MISSING`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LimitsView {
    pub up: Vec<LimitRow>,
    pub down: Vec<LimitRow>,
}

/// One `from → to` row of a station limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitRow {
    pub from: String,
    pub to: String,
}
