//! Temporary content repositories
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::{FixtureError, Result};
use packlint_validation::{ContentEntity, ContentKind, DocumentParser};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Serialization used when writing a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Yaml,
    Json,
}

impl FixtureFormat {
    /// YAML for `.yml`/`.yaml`, JSON for everything else
    pub fn for_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            FixtureFormat::Yaml
        } else {
            FixtureFormat::Json
        }
    }

    fn render(self, document: &Value) -> Result<String> {
        Ok(match self {
            FixtureFormat::Yaml => serde_yaml::to_string(document)?,
            FixtureFormat::Json => serde_json::to_string_pretty(document)?,
        })
    }
}

/// One file to write into the repository
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureFile {
    /// Path relative to the repository root
    pub relative_path: PathBuf,
    /// File contents
    pub contents: String,
    /// Kind and document, when the file is a content entity
    pub entity: Option<(ContentKind, Value)>,
}

fn check_relative(path: &Path) -> Result<()> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.as_os_str().is_empty() || escapes {
        return Err(FixtureError::InvalidPath(path.to_path_buf()));
    }
    Ok(())
}

/// Builder for a [`ContentRepo`]
#[derive(Debug, Default)]
pub struct ContentRepoBuilder {
    files: Vec<FixtureFile>,
}

impl ContentRepoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content entity at `Packs/<pack>/<KindFolder>/<file_name>`.
    ///
    /// The document is written as YAML or JSON depending on `file_name`.
    pub fn entity(self, pack: &str, kind: ContentKind, file_name: &str, document: Value) -> Result<Self> {
        let format = FixtureFormat::for_file_name(file_name);
        self.entity_as(pack, kind, file_name, document, format)
    }

    /// Add a content entity with an explicit serialization
    pub fn entity_as(
        mut self,
        pack: &str,
        kind: ContentKind,
        file_name: &str,
        document: Value,
        format: FixtureFormat,
    ) -> Result<Self> {
        let relative_path = Path::new("Packs")
            .join(pack)
            .join(kind.folder_name())
            .join(file_name);
        check_relative(&relative_path)?;

        self.files.push(FixtureFile {
            relative_path,
            contents: format.render(&document)?,
            entity: Some((kind, document)),
        });
        Ok(self)
    }

    /// Add a file with literal contents, e.g. an unparseable document or a
    /// project config
    pub fn raw_file(mut self, relative_path: impl AsRef<Path>, contents: &str) -> Result<Self> {
        let relative_path = relative_path.as_ref().to_path_buf();
        check_relative(&relative_path)?;

        self.files.push(FixtureFile {
            relative_path,
            contents: contents.to_string(),
            entity: None,
        });
        Ok(self)
    }

    /// Write every file into a fresh temporary directory
    pub fn build(self) -> Result<ContentRepo> {
        let mut seen = BTreeSet::new();
        for file in &self.files {
            if !seen.insert(file.relative_path.clone()) {
                return Err(FixtureError::DuplicateFile(file.relative_path.clone()));
            }
        }

        let dir = TempDir::new()?;
        for file in &self.files {
            let path = dir.path().join(&file.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.contents)?;
        }

        Ok(ContentRepo {
            dir,
            files: self.files,
        })
    }
}

/// A content repository on disk, removed when dropped
#[derive(Debug)]
pub struct ContentRepo {
    dir: TempDir,
    files: Vec<FixtureFile>,
}

impl ContentRepo {
    pub fn builder() -> ContentRepoBuilder {
        ContentRepoBuilder::new()
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file in the repository
    pub fn path_of(&self, relative_path: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative_path)
    }

    /// Files declared through the builder, in declaration order
    pub fn files(&self) -> &[FixtureFile] {
        &self.files
    }

    /// Every file under the root, relative and sorted
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(self.root()) {
            let entry = entry?;
            if entry.file_type().is_file() {
                if let Ok(relative) = entry.path().strip_prefix(self.root()) {
                    files.push(relative.to_path_buf());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load every declared entity back from disk with its declared kind
    pub fn entities(&self) -> Result<Vec<ContentEntity>> {
        let parser = DocumentParser::new();
        let mut entities = Vec::new();

        for file in &self.files {
            if let Some((kind, _)) = &file.entity {
                let loaded = parser.load(&self.path_of(&file.relative_path))?;
                let file_path = loaded.path.to_string_lossy().into_owned();
                entities.push(ContentEntity::new(loaded.document, file_path, *kind));
            }
        }

        Ok(entities)
    }
}
