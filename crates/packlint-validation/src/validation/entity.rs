//! Content entities and their kinds
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::loader::{LoadedDocument, RootShape};
use crate::validation::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kinds of content items packlint knows how to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    CorrelationRule,
    ParsingRule,
    ModelingRule,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::CorrelationRule,
        ContentKind::ParsingRule,
        ContentKind::ModelingRule,
    ];

    /// Snake-case name, also the canonical file-name prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::CorrelationRule => "correlation_rule",
            ContentKind::ParsingRule => "parsing_rule",
            ContentKind::ModelingRule => "modeling_rule",
        }
    }

    /// Folder holding this kind inside a pack
    pub fn folder_name(&self) -> &'static str {
        match self {
            ContentKind::CorrelationRule => "CorrelationRules",
            ContentKind::ParsingRule => "ParsingRules",
            ContentKind::ModelingRule => "ModelingRules",
        }
    }

    /// Field carrying the document's declared identifier
    pub fn identity_field(&self) -> &'static str {
        match self {
            ContentKind::CorrelationRule => "global_rule_id",
            ContentKind::ParsingRule | ContentKind::ModelingRule => "id",
        }
    }

    /// Kind whose pack folder is `name`
    pub fn from_folder(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.folder_name() == name)
    }

    /// Infer a kind from the path, falling back to the document shape.
    ///
    /// Folder wins over file-name prefix, which wins over shape.
    pub fn infer(file_path: &str, document: &Value) -> Option<Self> {
        let path = Path::new(file_path);

        let from_folder = path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .find_map(Self::from_folder);
        if from_folder.is_some() {
            return from_folder;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if let Some(kind) = Self::ALL
                .into_iter()
                .find(|kind| stem.starts_with(kind.as_str()))
            {
                return Some(kind);
            }
        }

        if document.get("global_rule_id").is_some() {
            return Some(ContentKind::CorrelationRule);
        }

        None
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown content kind '{}', expected one of: {}",
                    s,
                    Self::ALL.map(|k| k.as_str()).join(", ")
                )
            })
    }
}

/// A parsed document under validation
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntity {
    document: Value,
    file_path: String,
    kind: ContentKind,
}

impl ContentEntity {
    /// Create an entity with an explicit kind
    pub fn new(document: Value, file_path: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            document,
            file_path: file_path.into(),
            kind,
        }
    }

    /// Create an entity, inferring its kind
    pub fn infer(document: Value, file_path: impl Into<String>) -> ValidationResult<Self> {
        let file_path = file_path.into();
        let kind = ContentKind::infer(&file_path, &document)
            .ok_or_else(|| ValidationError::UnknownKind {
                file_path: file_path.clone(),
            })?;
        Ok(Self::new(document, file_path, kind))
    }

    /// Create an entity from loader output, inferring its kind unless given
    pub fn from_loaded(loaded: LoadedDocument, kind: Option<ContentKind>) -> ValidationResult<Self> {
        let file_path = loaded.path.to_string_lossy().into_owned();
        match kind {
            Some(kind) => Ok(Self::new(loaded.document, file_path, kind)),
            None => Self::infer(loaded.document, file_path),
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn root_shape(&self) -> RootShape {
        RootShape::of(&self.document)
    }

    /// A top-level string field, when the root is a mapping
    pub fn declared_field(&self, field: &str) -> Option<&str> {
        self.document.get(field).and_then(Value::as_str)
    }

    /// The declared identifier for this kind
    pub fn declared_id(&self) -> Option<&str> {
        self.declared_field(self.kind.identity_field())
    }

    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.file_path).file_name().and_then(|s| s.to_str())
    }

    pub fn file_stem(&self) -> Option<&str> {
        Path::new(&self.file_path).file_stem().and_then(|s| s.to_str())
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_path).extension().and_then(|s| s.to_str())
    }

    /// Pack owning this file: the component right after `Packs`
    pub fn pack_name(&self) -> Option<&str> {
        let mut components = Path::new(&self.file_path)
            .components()
            .filter_map(|c| c.as_os_str().to_str());
        components.find(|c| *c == "Packs")?;
        // The pack directory must not be the file itself
        let pack = components.next()?;
        components.next().map(|_| pack)
    }
}
