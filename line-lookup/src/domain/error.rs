//! Domain error types.
//!
//! These errors describe data that cannot be interpreted at all. Missing
//! optional fields are never errors; they resolve to defaults instead.

use super::LineName;

/// Errors raised while interpreting dataset files.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatasetError {
    /// The dataset is not an object with a `stations` sequence
    #[error("malformed dataset for {line} line: {message}")]
    Malformed { line: LineName, message: String },

    /// The manifest is not an object with a `files` sequence
    #[error("malformed manifest: {0}")]
    MalformedManifest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DatasetError::Malformed {
            line: LineName::parse("frankston").unwrap(),
            message: "missing field `stations`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed dataset for frankston line: missing field `stations`"
        );

        let err = DatasetError::MalformedManifest("expected a sequence".into());
        assert_eq!(err.to_string(), "malformed manifest: expected a sequence");
    }
}
