//! Document parsing for YAML and JSON content items
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// File extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    /// Every extension packlint accepts, in a stable order
    pub fn accepted_extensions() -> &'static [&'static str] {
        &["yml", "yaml", "json"]
    }

    /// Whether a path carries one of the accepted extensions
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Top-level shape of a parsed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootShape {
    /// Key/value mapping
    Mapping,
    /// List; for YAML this means the file starts with a `-` marker
    Sequence,
    /// String, number, boolean or null
    Scalar,
}

impl RootShape {
    /// Classify a parsed value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => RootShape::Mapping,
            Value::Array(_) => RootShape::Sequence,
            _ => RootShape::Scalar,
        }
    }
}

impl fmt::Display for RootShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootShape::Mapping => write!(f, "mapping"),
            RootShape::Sequence => write!(f, "sequence"),
            RootShape::Scalar => write!(f, "scalar"),
        }
    }
}

/// A parsed document together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// Originating file path
    pub path: PathBuf,
    /// Format the content was parsed as
    pub format: Format,
    /// Generic document tree
    pub document: Value,
}

impl LoadedDocument {
    /// Shape of the document root
    pub fn root_shape(&self) -> RootShape {
        RootShape::of(&self.document)
    }

    /// Whether the raw document is sequence-rooted
    pub fn is_sequence_rooted(&self) -> bool {
        self.root_shape() == RootShape::Sequence
    }
}

/// Parser for content documents
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new document parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a file.
    ///
    /// Files without a known extension are still parsed (JSON, then YAML) so
    /// they reach the validators and get an extension diagnostic.
    pub fn load(&self, path: &Path) -> LoaderResult<LoadedDocument> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read document");

        let (document, format) = self.parse_with_fallback(&content, path)?;
        Ok(LoadedDocument {
            path: path.to_path_buf(),
            format,
            document,
        })
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Convert to JSON Value for consistent handling
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse with the extension's format, or try JSON then YAML when the
    /// extension is not one packlint knows
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        // A file that claims a format keeps that format's error
        if let Ok(format) = Format::from_path(path) {
            return self
                .parse_content(content, format, path)
                .map(|value| (value, format));
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("rule.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("rule.YAML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("rule.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("rule.txt")).is_err());
        assert!(Format::from_path(Path::new("rule")).is_err());
    }

    #[test]
    fn test_yaml_leading_hyphen_is_sequence() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("- global_rule_id: x\n  name: y\n", Path::new("r.yml"))
            .unwrap();
        assert_eq!(RootShape::of(&value), RootShape::Sequence);
    }

    #[test]
    fn test_yaml_mapping() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("global_rule_id: x\nname: y\n", Path::new("r.yml"))
            .unwrap();
        assert_eq!(RootShape::of(&value), RootShape::Mapping);
        assert_eq!(value["global_rule_id"], "x");
    }

    #[test]
    fn test_load_falls_back_for_unknown_extension() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "name: y").unwrap();

        let loaded = DocumentParser::new().load(file.path()).unwrap();
        assert_eq!(loaded.format, Format::Yaml);
        assert_eq!(loaded.root_shape(), RootShape::Mapping);
    }

    #[test]
    fn test_invalid_json_keeps_json_error() {
        let parser = DocumentParser::new();
        let err = parser
            .parse_with_fallback("{ not json", Path::new("r.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = DocumentParser::new()
            .load(Path::new("/definitely/not/here.yml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }
}
