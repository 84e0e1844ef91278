//! On-disk fixtures for packlint tests
//!
//! This crate builds throwaway content repositories
//! (`Packs/<pack>/<KindFolder>/<file>`) in a temporary directory and ships the
//! canonical validation scenarios, so tests can exercise discovery, loading
//! and validation against real files.
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

pub mod repo;
pub mod scenarios;

use std::path::PathBuf;
use thiserror::Error;

pub use repo::{ContentRepo, ContentRepoBuilder, FixtureFile, FixtureFormat};
pub use scenarios::{scenario_builder, scenarios, Scenario, SCENARIO_PACK};

/// Fixture error types
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Fixture path '{}' must be relative and stay inside the repository", .0.display())]
    InvalidPath(PathBuf),

    #[error("Fixture file '{}' is declared twice", .0.display())]
    DuplicateFile(PathBuf),

    #[error("Failed to load fixture: {0}")]
    Load(#[from] packlint_validation::LoaderError),

    #[error("Failed to walk fixture repository: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
