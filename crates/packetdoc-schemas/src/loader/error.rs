//! Error types for document loading operations
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for reading packet and enum documents
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The input location does not exist
    #[error("Input path '{path}' does not exist")]
    InputNotFound { path: PathBuf },

    /// The input location exists but is not a directory
    #[error("Input path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// A document parsed as JSON but does not have the expected layout
    #[error("Unexpected document shape in '{path}': {reason}")]
    UnexpectedShape { path: PathBuf, reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: impl Into<PathBuf>, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: path.into(),
            source: error,
        }
    }

    /// Create an unexpected shape error
    pub fn unexpected_shape(path: &Path, reason: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &Path {
        match self {
            Self::IoError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::InputNotFound { path }
            | Self::NotADirectory { path }
            | Self::UnexpectedShape { path, .. } => path,
        }
    }

    /// Whether this error only affects a single document.
    ///
    /// Input-location errors abort a run; everything else is scoped to the
    /// document that produced it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InputNotFound { .. } | Self::NotADirectory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("packet.json");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), path.as_path());

        let shape_err = LoaderError::unexpected_shape(&path, "root is not an object");
        assert!(shape_err.to_string().contains("root is not an object"));
    }

    #[test]
    fn test_error_recovery() {
        let parse_err = LoaderError::json_parse_error(
            "broken.json",
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        );
        assert!(parse_err.is_recoverable());

        let missing = LoaderError::InputNotFound {
            path: PathBuf::from("nowhere"),
        };
        assert!(!missing.is_recoverable());
    }
}
