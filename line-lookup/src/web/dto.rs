//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{LineDataset, LineName};
use crate::resolver::{DisplayOptions, ResolvedView};

/// Query string of the lookup page.
///
/// The page is a plain GET form: each change resubmits the whole
/// selection. `prev_line` carries the line the form was rendered for, so a
/// line change can be told apart from a station change.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub line: Option<String>,
    pub prev_line: Option<String>,
    pub station: Option<String>,
    pub terminating: Option<String>,
    pub stabling: Option<String>,
}

impl PageQuery {
    /// Toggles requested by the form.
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions::new(toggle(&self.terminating), toggle(&self.stabling))
    }

    /// Whether the line differs from the one the form was rendered for.
    pub fn line_changed(&self) -> bool {
        non_empty(&self.line) != non_empty(&self.prev_line)
    }
}

/// Query string of the station view endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub station: Option<String>,
    pub terminating: Option<String>,
    pub stabling: Option<String>,
}

impl ViewQuery {
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions::new(toggle(&self.terminating), toggle(&self.stabling))
    }

    /// The requested station, if one was given.
    pub fn station(&self) -> Option<&str> {
        non_empty(&self.station)
    }
}

/// Interpret a checkbox or flag parameter.
///
/// Present means on (`on`, `true`, `1`, or empty), except for the explicit
/// `false`, `off` and `0`.
pub fn toggle(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "false" | "off" | "0"),
    }
}

/// A trimmed, non-empty parameter value.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A line in the manifest.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    /// Line identifier (dataset file stem)
    pub id: String,

    /// Human-readable name
    pub display_name: String,
}

impl LineSummary {
    pub fn from_line(line: &LineName) -> Self {
        Self {
            id: line.as_str().to_string(),
            display_name: line.display_name(),
        }
    }
}

/// Response listing available lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineSummary>,
}

/// Response describing one line.
#[derive(Debug, Serialize)]
pub struct LineDetailResponse {
    pub id: String,
    pub display_name: String,

    /// Station names in line order
    pub stations: Vec<String>,

    pub terminating: Vec<String>,
    pub stabling: Vec<String>,
}

impl LineDetailResponse {
    pub fn from_dataset(dataset: &LineDataset) -> Self {
        Self {
            id: dataset.line.as_str().to_string(),
            display_name: dataset.line.display_name(),
            stations: dataset.station_names().map(str::to_string).collect(),
            terminating: dataset.terminating.clone(),
            stabling: dataset.stabling.clone(),
        }
    }
}

/// Response for a resolved station view.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub line: String,
    pub display_name: String,

    /// The resolved view; absent when there is nothing to show
    pub view: Option<ResolvedView>,

    /// Prompt shown instead of a view
    pub message: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
