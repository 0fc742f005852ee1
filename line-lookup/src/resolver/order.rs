//! Station positions and range membership.

use std::collections::HashMap;

use crate::domain::{Station, StationRange};

/// Position of each station along its line.
///
/// Built once per resolution. When a name appears more than once the
/// first occurrence wins.
#[derive(Debug, Clone)]
pub struct StationOrder<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> StationOrder<'a> {
    /// Index the given stations in line order.
    pub fn new(stations: &'a [Station]) -> Self {
        let mut positions = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            positions.entry(station.name.as_str()).or_insert(idx);
        }
        Self { positions }
    }

    /// Position of a station on the line, if it is on the line.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Whether `name` lies within `range`, endpoints included.
    ///
    /// Returns false when either endpoint (or the station itself) is not on
    /// the line. A range whose start lies after its end contains nothing;
    /// endpoints are never swapped.
    pub fn contains(&self, range: &StationRange, name: &str) -> bool {
        let (Some(start), Some(end)) = (range.start.as_deref(), range.end.as_deref()) else {
            return false;
        };
        let (Some(start), Some(end), Some(pos)) = (
            self.position(start),
            self.position(end),
            self.position(name),
        ) else {
            return false;
        };

        start <= pos && pos <= end
    }
}

/// Case- and whitespace-insensitive name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether `name` matches any entry of `list` under [`names_match`].
pub fn listed(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| names_match(entry, name))
}
