//! Error types for corpus lookup, export and diagnostics loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the corpus crate.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// No fixture with the requested name exists.
    #[error("fixture not found: '{0}'")]
    NotFound(String),

    /// Reading or writing a file failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An `--export-fixes` document could not be parsed.
    #[error("invalid export-fixes document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CorpusError {
    /// Wraps an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CorpusError::NotFound(_))
    }
}

/// Result alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CorpusError::NotFound("nope".to_string());
        assert_eq!(err.to_string(), "fixture not found: 'nope'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = CorpusError::io(
            "/tmp/out/manifest.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out/manifest.json"));
        assert!(msg.contains("denied"));
        assert!(!err.is_not_found());
    }
}
