//! Error types for document loading
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures while reading or parsing a content document
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Content that no supported format could parse
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Directory traversal errors
    #[error("Failed to walk directory '{path}': {reason}")]
    WalkError { path: PathBuf, reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a directory walk error
    pub fn walk_error(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::WalkError {
            path,
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. } => path,
            Self::YamlParseError { path, .. } => path,
            Self::JsonParseError { path, .. } => path,
            Self::UnsupportedFormat { path } => path,
            Self::WalkError { path, .. } => path,
        }
    }
}
