//! Unit tests for station attribute resolution.

use super::*;
use crate::domain::{LimitSegment, LineName, ProtectionZone, StationRange};

fn dataset(names: &[&str]) -> LineDataset {
    LineDataset::new(
        LineName::parse("test").unwrap(),
        names.iter().map(|n| Station::named(*n)).collect(),
    )
}

/// The three-station line used by the worked examples.
fn abc() -> LineDataset {
    let mut d = dataset(&["A", "B", "C"]);
    d.terminating = vec!["C".into()];
    d.high_beam_range = Some(StationRange::new("A", "B"));
    d
}

fn zone(zone_type: &str, start: &str, end: &str) -> ProtectionZone {
    ProtectionZone {
        zone_type: Some(zone_type.into()),
        range: StationRange::new(start, end),
    }
}

fn flags_for(d: &LineDataset, name: &str) -> StationFlags {
    let station = d.station(name).unwrap();
    resolve(Some(station), d, DisplayOptions::default())
        .unwrap()
        .station
        .unwrap()
        .flags
}

#[test]
fn nothing_selected_and_no_lists_is_suppressed() {
    let d = abc();
    assert_eq!(resolve(None, &d, DisplayOptions::default()), None);
}

#[test]
fn enabled_but_empty_lists_are_suppressed() {
    let d = dataset(&["A", "B"]);
    assert_eq!(resolve(None, &d, DisplayOptions::new(true, true)), None);
}

#[test]
fn station_inside_high_beam_range() {
    let d = abc();
    let flags = flags_for(&d, "B");
    assert!(!flags.terminating);
    assert!(!flags.stabling);
    assert!(flags.high_beam);
    assert!(!flags.in_protection_zone());
}

#[test]
fn terminating_station_outside_high_beam_range() {
    let d = abc();
    let flags = flags_for(&d, "C");
    assert!(flags.terminating);
    assert!(!flags.high_beam);
}

#[test]
fn terminating_list_without_station() {
    let d = abc();
    let view = resolve(None, &d, DisplayOptions::new(true, false)).unwrap();
    assert_eq!(view.station, None);
    assert_eq!(view.terminating, Some(vec!["C".to_string()]));
    assert_eq!(view.stabling, None);
}

#[test]
fn lists_are_copied_verbatim() {
    let mut d = dataset(&["Caulfield"]);
    d.terminating = vec![" Caulfield ".into(), "FRANKSTON".into()];
    d.stabling = vec!["Carrum sidings".into()];

    let view = resolve(None, &d, DisplayOptions::new(true, true)).unwrap();
    assert_eq!(
        view.terminating,
        Some(vec![" Caulfield ".to_string(), "FRANKSTON".to_string()])
    );
    assert_eq!(view.stabling, Some(vec!["Carrum sidings".to_string()]));
}

#[test]
fn lists_follow_toggles_with_station_selected() {
    let mut d = abc();
    d.stabling = vec!["A".into()];
    let station = d.station("A").unwrap();

    let view = resolve(Some(station), &d, DisplayOptions::new(false, true)).unwrap();
    assert!(view.station.is_some());
    assert_eq!(view.terminating, None);
    assert_eq!(view.stabling, Some(vec!["A".to_string()]));
}

#[test]
fn membership_ignores_case_and_whitespace() {
    let mut d = dataset(&[" Caulfield "]);
    d.terminating = vec!["caulfield".into()];
    d.stabling = vec!["CAULFIELD ".into()];

    let flags = flags_for(&d, " Caulfield ");
    assert!(flags.terminating);
    assert!(flags.stabling);
}

#[test]
fn high_beam_with_unknown_endpoint_is_false_everywhere() {
    let mut d = abc();
    d.high_beam_range = Some(StationRange::new("A", "Z"));
    for name in ["A", "B", "C"] {
        assert!(!flags_for(&d, name).high_beam);
    }
}

#[test]
fn reversed_high_beam_range_is_empty() {
    let mut d = abc();
    d.high_beam_range = Some(StationRange::new("C", "A"));
    for name in ["A", "B", "C"] {
        assert!(!flags_for(&d, name).high_beam);
    }
}

#[test]
fn first_declared_zone_wins() {
    let mut d = dataset(&["A", "B", "C", "D"]);
    d.protection_zones = vec![
        zone("Zone 1", "C", "D"),
        zone("Zone 2", "A", "C"),
        zone("Zone 3", "B", "B"),
    ];

    let b = flags_for(&d, "B").protection_zone.unwrap();
    assert_eq!(b.index, 1);
    assert_eq!(b.zone_type.as_deref(), Some("Zone 2"));

    let c = flags_for(&d, "C").protection_zone.unwrap();
    assert_eq!(c.zone_type.as_deref(), Some("Zone 1"));
}

#[test]
fn zones_with_bad_ranges_are_skipped() {
    let mut d = dataset(&["A", "B", "C"]);
    d.protection_zones = vec![
        ProtectionZone::default(),
        zone("Broken", "B", "Nowhere"),
        zone("Zone 9", "B", "C"),
    ];

    assert!(!flags_for(&d, "A").in_protection_zone());
    let b = flags_for(&d, "B").protection_zone.unwrap();
    assert_eq!(b.index, 2);
}

#[test]
fn untyped_zone_still_matches() {
    let mut d = dataset(&["A", "B"]);
    d.protection_zones = vec![ProtectionZone {
        zone_type: None,
        range: StationRange::new("A", "B"),
    }];

    let matched = flags_for(&d, "A").protection_zone.unwrap();
    assert_eq!(matched.zone_type, None);
}

#[test]
fn station_fields_are_carried_through() {
    let mut d = dataset(&["Richmond"]);
    d.stations[0].signaller = Some("Metrol Board 3".into());
    d.stations[0].description = Some("Junction for Sandringham line".into());

    let view = resolve(d.stations.first(), &d, DisplayOptions::default()).unwrap();
    let station = view.station.unwrap();
    assert_eq!(station.name, "Richmond");
    assert_eq!(station.signaller.as_deref(), Some("Metrol Board 3"));
    assert_eq!(station.recorded, None);
    assert_eq!(
        station.description.as_deref(),
        Some("Junction for Sandringham line")
    );
    assert_eq!(station.limits, None);
}

#[test]
fn limits_fill_missing_endpoints() {
    let mut d = dataset(&["Moorabbin"]);
    d.stations[0].station_limits = StationLimits {
        up: vec![LimitSegment {
            from: Some("MRN 12".into()),
            to: None,
        }],
        down: Vec::new(),
    };

    let view = resolve(d.stations.first(), &d, DisplayOptions::default()).unwrap();
    let limits = view.station.unwrap().limits.unwrap();
    assert_eq!(
        limits.up,
        vec![LimitRow {
            from: "MRN 12".into(),
            to: MISSING.into(),
        }]
    );
    assert!(limits.down.is_empty());
}

#[test]
fn resolve_is_idempotent() {
    let mut d = abc();
    d.stabling = vec!["B".into()];
    d.protection_zones = vec![zone("Zone 1", "B", "C")];
    let station = d.station("B");
    let options = DisplayOptions::new(true, true);

    let first = resolve(station, &d, options);
    let second = resolve(station, &d, options);
    assert_eq!(first, second);
}

#[test]
fn station_not_on_line_gets_no_range_flags() {
    let d = abc();
    let stranger = Station::named("B ");
    let flags = resolve(Some(&stranger), &d, DisplayOptions::default())
        .unwrap()
        .station
        .unwrap()
        .flags;
    assert!(!flags.high_beam);
    assert!(!flags.terminating);
}
