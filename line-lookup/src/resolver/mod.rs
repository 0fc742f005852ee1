//! Station attribute resolution.
//!
//! Given a line dataset and (optionally) one of its stations, works out
//! everything the lookup page displays: the station's own fields, whether
//! it is a terminating or stabling location, whether it falls inside the
//! high-beam range or a track force protection zone, and which line-wide
//! lists were asked for.
//!
//! Resolution is a pure function of its inputs and is cheap enough to run
//! on every request.

mod order;
mod view;

#[cfg(test)]
mod resolve_tests;

pub use order::{StationOrder, listed, names_match};
pub use view::{
    DisplayOptions, LimitRow, LimitsView, MISSING, ResolvedView, StationFlags, StationView,
    ZoneMatch,
};

use crate::domain::{LimitSegment, LineDataset, Station, StationLimits};

/// Resolve the view for a selection.
///
/// Returns `None` when there is nothing to show: no station is selected and
/// neither requested list has any entries.
pub fn resolve(
    station: Option<&Station>,
    dataset: &LineDataset,
    options: DisplayOptions,
) -> Option<ResolvedView> {
    let station = station.map(|s| station_view(s, dataset));

    let terminating = section(options.show_terminating, &dataset.terminating);
    let stabling = section(options.show_stabling, &dataset.stabling);

    if station.is_none() && terminating.is_none() && stabling.is_none() {
        return None;
    }

    Some(ResolvedView {
        station,
        terminating,
        stabling,
    })
}

/// Derive the flags for a station.
pub fn station_flags(station: &Station, dataset: &LineDataset) -> StationFlags {
    let order = StationOrder::new(&dataset.stations);
    let name = station.name.as_str();

    let high_beam = dataset
        .high_beam_range
        .as_ref()
        .is_some_and(|range| order.contains(range, name));

    let protection_zone = dataset
        .protection_zones
        .iter()
        .enumerate()
        .find(|(_, zone)| order.contains(&zone.range, name))
        .map(|(index, zone)| ZoneMatch {
            index,
            zone_type: zone.zone_type.clone(),
        });

    StationFlags {
        terminating: listed(&dataset.terminating, name),
        stabling: listed(&dataset.stabling, name),
        high_beam,
        protection_zone,
    }
}

fn station_view(station: &Station, dataset: &LineDataset) -> StationView {
    StationView {
        name: station.name.clone(),
        signaller: station.signaller.clone(),
        recorded: station.recorded.clone(),
        caution_orders: station.caution_orders.clone(),
        driver_points: station.driver_points.clone(),
        description: station.description.clone(),
        flags: station_flags(station, dataset),
        limits: limits_view(&station.station_limits),
    }
}

fn limits_view(limits: &StationLimits) -> Option<LimitsView> {
    if limits.is_empty() {
        return None;
    }

    let rows = |segments: &[LimitSegment]| -> Vec<LimitRow> {
        segments
            .iter()
            .map(|s| LimitRow {
                from: s.from.clone().unwrap_or_else(|| MISSING.to_string()),
                to: s.to.clone().unwrap_or_else(|| MISSING.to_string()),
            })
            .collect()
    };

    Some(LimitsView {
        up: rows(&limits.up),
        down: rows(&limits.down),
    })
}

fn section(enabled: bool, entries: &[String]) -> Option<Vec<String>> {
    (enabled && !entries.is_empty()).then(|| entries.to_vec())
}
