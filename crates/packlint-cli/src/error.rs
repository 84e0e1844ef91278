//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use packlint_validation::{LoaderError, ValidationError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Blocking diagnostics were reported
    #[error("Validation failed: {errors} error(s) in {files} file(s)")]
    ValidationFailed { files: usize, errors: usize },

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A document could not be read or parsed
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Validator setup error, e.g. a code missing from the catalog
    #[error("Validator error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A validation task panicked or was cancelled
    #[error("Validation task failed: {0}")]
    Task(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
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
            Self::ValidationFailed { .. } => 1,
            Self::Io(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::Loader(_) => 4,
            Self::Config(_) => 5,
            Self::Validation(_) => 7,
            Self::Task(_) => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::TomlDe(_) | Self::TomlSer(_) => 14,
            Self::Other { .. } => 99,
        }
    }
}

/// Extension trait for displaying errors with context
pub trait ErrorContext<T> {
    /// Add context with a closure (only evaluated on error)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", f(), inner),
            }
        })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
