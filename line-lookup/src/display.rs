//! Display nodes for the output panel.
//!
//! Resolution results are turned into a flat list of typed nodes, which the
//! `output.html` template renders. Nodes only restate what the resolver
//! decided; nothing is derived here.

use crate::controller::Outcome;
use crate::resolver::{LimitRow, MISSING, ResolvedView, StationView};

/// One block of the output panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    Heading(Heading),
    Fields(Vec<Field>),
    Paragraph(Paragraph),
    Flags(Vec<Flag>),
    Limits(Limits),
    List(List),
    Message(Message),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
}

/// A labelled value in the station facts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub class: &'static str,
    pub text: String,
}

/// A yes/no fact, with optional detail shown when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub label: &'static str,
    pub value: bool,
    pub detail: Option<String>,
}

impl Flag {
    /// "Yes" or "No".
    pub fn answer(&self) -> &'static str {
        if self.value { "Yes" } else { "No" }
    }

    /// The answer followed by the detail, e.g. "Yes (Zone A)".
    pub fn summary(&self) -> String {
        match (&self.detail, self.value) {
            (Some(detail), true) => format!("{} ({})", self.answer(), detail),
            _ => self.answer().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    pub up: Vec<LimitRow>,
    pub down: Vec<LimitRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub title: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Nodes for a controller outcome.
pub fn outcome_nodes(outcome: &Outcome) -> Vec<DisplayNode> {
    match outcome {
        Outcome::View(view) => nodes(view),
        Outcome::Prompt(text) => vec![message(MessageKind::Info, text)],
        Outcome::Failed(text) => vec![message(MessageKind::Error, text)],
        Outcome::Empty | Outcome::Stale => Vec::new(),
    }
}

/// Nodes for a resolved view.
pub fn nodes(view: &ResolvedView) -> Vec<DisplayNode> {
    let mut out = Vec::new();

    if let Some(station) = &view.station {
        station_nodes(station, &mut out);
    }

    if let Some(items) = &view.terminating {
        out.push(DisplayNode::List(List {
            title: "Terminating Locations",
            items: items.clone(),
        }));
    }

    if let Some(items) = &view.stabling {
        out.push(DisplayNode::List(List {
            title: "Stabling Locations",
            items: items.clone(),
        }));
    }

    out
}

fn station_nodes(station: &StationView, out: &mut Vec<DisplayNode>) {
    out.push(DisplayNode::Heading(Heading {
        text: station.name.clone(),
    }));

    let field = |label, value: &Option<String>| Field {
        label,
        value: value.clone().unwrap_or_else(|| MISSING.to_string()),
    };
    out.push(DisplayNode::Fields(vec![
        field("Signaller", &station.signaller),
        field("Recorded", &station.recorded),
        field("Caution Orders", &station.caution_orders),
        field("Driver Points", &station.driver_points),
    ]));

    if let Some(text) = &station.description {
        out.push(DisplayNode::Paragraph(Paragraph {
            class: "desc",
            text: text.clone(),
        }));
    }

    let flags = &station.flags;
    out.push(DisplayNode::Flags(vec![
        Flag {
            label: "Terminating location",
            value: flags.terminating,
            detail: None,
        },
        Flag {
            label: "Stabling location",
            value: flags.stabling,
            detail: None,
        },
        Flag {
            label: "High beam range",
            value: flags.high_beam,
            detail: None,
        },
        Flag {
            label: "Track force protection zone",
            value: flags.in_protection_zone(),
            detail: flags
                .protection_zone
                .as_ref()
                .map(|z| z.zone_type.clone().unwrap_or_else(|| MISSING.to_string())),
        },
    ]));

    if let Some(limits) = &station.limits {
        out.push(DisplayNode::Limits(Limits {
            up: limits.up.clone(),
            down: limits.down.clone(),
        }));
    }
}

fn message(kind: MessageKind, text: &str) -> DisplayNode {
    DisplayNode::Message(Message {
        kind,
        text: text.to_string(),
    })
}
