//! Line identifiers.

use std::fmt;

/// Extension used by line dataset files.
const DATASET_EXTENSION: &str = ".json";

/// Error returned when a line identifier cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line name {value:?}: {reason}")]
pub struct InvalidLineName {
    value: String,
    reason: &'static str,
}

/// Identifier of a line, as listed in the manifest.
///
/// The identifier doubles as the dataset file stem (`frankston` is loaded
/// from `frankston.json`), so it is restricted to a single path segment.
///
/// # Examples
///
/// ```
/// use line_lookup::domain::LineName;
///
/// let line = LineName::from_file_name("frankston.json").unwrap();
/// assert_eq!(line.as_str(), "frankston");
/// assert_eq!(line.display_name(), "Frankston");
/// assert_eq!(line.file_name(), "frankston.json");
///
/// assert!(LineName::parse("../secrets").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineName(String);

impl LineName {
    /// Parse a line identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidLineName> {
        let invalid = |reason| InvalidLineName {
            value: s.to_string(),
            reason,
        };

        if s.trim().is_empty() {
            return Err(invalid("must not be empty"));
        }
        if s.starts_with('.') {
            return Err(invalid("must not start with '.'"));
        }
        if s.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
            return Err(invalid("must be a single path segment"));
        }

        Ok(Self(s.to_string()))
    }

    /// Derive the identifier from a manifest entry such as `frankston.json`.
    pub fn from_file_name(file_name: &str) -> Result<Self, InvalidLineName> {
        let stem = file_name
            .strip_suffix(DATASET_EXTENSION)
            .unwrap_or(file_name);
        Self::parse(stem)
    }

    /// The identifier as given in the manifest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the dataset file for this line.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, DATASET_EXTENSION)
    }

    /// Human-readable name: the identifier with its first letter capitalized.
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Debug for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineName({})", self.0)
    }
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
