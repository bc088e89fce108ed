//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use packetdoc_schemas::{GeneratorError, LoaderError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input directory does not exist
    #[error("Input path '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    /// Input path exists but is not a directory
    #[error("Input path '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Nothing to render in the input directory
    #[error("No JSON files found in {}", path.display())]
    NoDocuments { path: PathBuf },

    /// Reading the input failed for another reason
    #[error("Loader error: {0}")]
    Loader(LoaderError),

    /// The run could not write its output
    #[error("Generation failed: {0}")]
    Generator(#[from] GeneratorError),

    /// Documents failed to render and `--fail-on-error` is set
    #[error("{count} document(s) failed to render")]
    DocumentsFailed { count: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl From<LoaderError> for Error {
    fn from(error: LoaderError) -> Self {
        match error {
            LoaderError::InputNotFound { path } => Self::InputNotFound { path },
            LoaderError::NotADirectory { path } => Self::NotADirectory { path },
            other => Self::Loader(other),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Loader(_) => 2,
            Self::InputNotFound { .. } => 3,
            Self::NotADirectory { .. } => 4,
            Self::NoDocuments { .. } => 5,
            Self::Config(_) => 6,
            Self::Generator(_) => 7,
            Self::DocumentsFailed { .. } => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Whether this outcome is reported as a warning rather than an error
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoDocuments { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let label = if error.is_warning() { "Warning:" } else { "Error:" };

    if use_color {
        use colored::Colorize;
        let label = if error.is_warning() {
            label.yellow().bold()
        } else {
            label.red().bold()
        };
        format!("{} {}", label, error)
    } else {
        format!("{} {}", label, error)
    }
}
