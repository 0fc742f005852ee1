//! Askama templates for the web frontend.

use askama::Template;

use crate::display::DisplayNode;
use crate::domain::LineName;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The lookup page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub lines: Vec<LineOption>,
    /// Set when the manifest could not be loaded.
    pub lines_error: bool,
    /// Identifier of the selected line, empty when none.
    pub selected_line: String,
    pub stations: Vec<StationOption>,
    /// Whether the station selector accepts input.
    pub stations_enabled: bool,
    pub show_terminating: bool,
    pub show_stabling: bool,
    pub nodes: Vec<DisplayNode>,
    pub version_label: String,
}

// ============================================================================
// Fragment Templates (no base.html)
// ============================================================================

/// Output panel contents.
#[derive(Template)]
#[template(path = "output.html")]
pub struct OutputTemplate {
    pub nodes: Vec<DisplayNode>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An entry of the line selector.
#[derive(Debug, Clone)]
pub struct LineOption {
    pub id: String,
    pub display_name: String,
    pub selected: bool,
}

impl LineOption {
    pub fn new(line: &LineName, selected: Option<&LineName>) -> Self {
        Self {
            id: line.as_str().to_string(),
            display_name: line.display_name(),
            selected: selected == Some(line),
        }
    }
}

/// An entry of the station selector.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub name: String,
    pub selected: bool,
}
