//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Project configuration files (YAML/JSON/TOML)
//! - The user configuration directory
//! - Command-line arguments (merged last)

use crate::cli::ValidateArgs;
use crate::error::{Error, ErrorContext, Result};
use packlint_validation::{ErrorCatalog, IgnoreList, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project configuration file names, in lookup order
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    ".packlint.yaml",
    ".packlint.yml",
    ".packlint.json",
    "packlint.toml",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report every violation as a warning
    pub print_as_warnings: bool,

    /// Do not list suppressed violations
    pub silence_suppressed: bool,

    /// Codes to suppress: `global` or a file path mapped to codes
    pub ignored_errors: IgnoreList,

    /// Batch settings
    pub validation: ValidationSection,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSection,
}

/// Batch validation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    /// Stop after the first invalid file
    pub fail_fast: bool,

    /// Stop after this many errors (0 = unlimited)
    pub max_errors: usize,

    /// Files validated concurrently (defaults to the CPU count)
    pub jobs: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Serialization format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::config(format!(
                "Unsupported config file '{}': expected .yaml, .yml, .json or .toml",
                path.display()
            ))),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?,
            FileFormat::Json => serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?,
            FileFormat::Toml => toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?,
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(Self::normalized(config))
    }

    /// Upper-case ignored codes so they match the catalog the way `--ignore` does
    fn normalized(mut config: Self) -> Self {
        let mut ignored = IgnoreList::new();
        for (scope, codes) in config.ignored_errors.iter() {
            for code in codes {
                ignored.insert(scope, code.trim().to_ascii_uppercase());
            }
        }
        config.ignored_errors = ignored;
        config
    }

    /// Load configuration from default locations.
    ///
    /// The first project file found in the current directory wins, then the
    /// user config; without either, defaults are used.
    pub fn load() -> Result<Self> {
        for path in Self::find_project_config().into_iter().chain(Self::user_config_path()) {
            match Self::from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to load config");
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Existing user-level config file (`config.yaml` or `config.toml`)
    pub fn user_config_path() -> Option<PathBuf> {
        let dir = dirs::config_dir()?.join("packlint");
        ["config.yaml", "config.toml"]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// First project config in the current directory
    pub fn find_project_config() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Serialize the configuration in the format implied by `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        Ok(match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Ignored codes that the catalog does not know
    pub fn unknown_ignored_codes(&self, catalog: &ErrorCatalog) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .ignored_errors
            .iter()
            .flat_map(|(_, codes)| codes.iter())
            .filter(|code| !catalog.contains(code))
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }

    /// Merge command-line flags over this configuration
    pub fn validation_config(&self, args: &ValidateArgs) -> ValidationConfig {
        let mut ignored = self.ignored_errors.clone();
        for entry in &args.ignore {
            ignored.insert(entry.scope.clone(), entry.code.clone());
        }

        let mut config = ValidationConfig::new()
            .with_ignored_errors(ignored)
            .with_print_as_warnings(self.print_as_warnings || args.warnings)
            .with_record_suppressed(!(self.silence_suppressed || args.silence_suppressed))
            .with_max_errors(args.max_errors.unwrap_or(self.validation.max_errors));

        if self.validation.fail_fast || args.fail_fast {
            config = config.with_fail_fast();
        }
        config
    }

    /// Concurrency for directory runs
    pub fn jobs(&self, args: &ValidateArgs) -> usize {
        args.jobs
            .or(self.validation.jobs)
            .filter(|jobs| *jobs > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    fn validate_args(argv: &[&str]) -> ValidateArgs {
        let mut full = vec!["packlint", "validate"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Validate(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn ignoring(ignored_errors: IgnoreList) -> Config {
        Config {
            ignored_errors,
            ..Config::default()
        }
    }

    #[test]
    fn test_round_trip_every_format() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            print_as_warnings: true,
            ..ignoring(IgnoreList::new().ignore_globally("BA102").ignore_for("wrongname.json", "CR101"))
        };

        for name in ["c.yaml", "c.json", "c.toml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config, "format {}", name);
        }
    }

    #[test]
    fn test_yaml_ignore_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".packlint.yaml");
        std::fs::write(
            &path,
            "ignored_errors:\n  global: [BA102]\n  wrongname.json: [CR101]\nsilence_suppressed: true\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.ignored_errors.is_ignored("CR101", "Packs/A/wrongname.json"));
        assert!(config.silence_suppressed);
        assert!(!config.print_as_warnings);
    }

    #[test]
    fn test_file_codes_are_normalized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".packlint.yaml");
        std::fs::write(&path, "ignored_errors:\n  global: [' ba102']\n  wrongname.json: [cr101]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.ignored_errors.is_ignored("CR101", "Packs/A/wrongname.json"));
        assert!(config.ignored_errors.is_ignored("BA102", "x.yml"));
        assert!(config.unknown_ignored_codes(&ErrorCatalog::builtin()).is_empty());
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        assert!(matches!(
            Config::from_file(Path::new("/definitely/not/here.yaml")),
            Err(Error::FileNotFound { .. })
        ));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "x=1").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_flags_merge_over_file() {
        let config = ignoring(IgnoreList::new().ignore_globally("BA102"));
        let args = validate_args(&["a.yml", "--ignore", "a.yml:CR101", "--warnings", "--max-errors", "3"]);

        let settings = config.validation_config(&args);
        assert!(settings.ignored_errors.is_ignored("BA102", "x.yml"));
        assert!(settings.ignored_errors.is_ignored("CR101", "a.yml"));
        assert!(settings.print_as_warnings);
        assert!(settings.record_suppressed);
        assert_eq!(settings.max_errors, 3);
        assert!(!settings.fail_fast);
    }

    #[test]
    fn test_unknown_ignored_codes() {
        let config = ignoring(IgnoreList::new().ignore_globally("ZZ999").ignore_for("a.yml", "CR101"));
        assert_eq!(config.unknown_ignored_codes(&ErrorCatalog::builtin()), vec!["ZZ999"]);
    }

    #[test]
    fn test_jobs_falls_back_to_cpu_count() {
        let config = Config::default();
        assert!(config.jobs(&validate_args(&["a.yml"])) >= 1);
        assert_eq!(config.jobs(&validate_args(&["a.yml", "--jobs", "2"])), 2);
    }
}
