//! Logging utilities for the packlint CLI
//!
//! This module provides:
//! - Run ID generation and tracking
//! - Performance timing spans
//! - Structured logging setup
//! - Multiple output formats (compact, full, JSON) to stderr or a file

use crate::config::LoggingSection;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Global run ID for the current invocation
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Enable console output
    pub console: bool,
    /// Optional file output path
    pub file: Option<PathBuf>,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
    /// Include span close events with timings
    pub span_events: bool,
    /// Module-based filtering
    pub module_filter: Option<HashMap<String, String>>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact format for everyday use
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            console: true,
            file: None,
            thread_ids: false,
            source_location: false,
            span_events: false,
            module_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
                config.span_events = true;
            }
        }

        config
    }

    /// Apply the `logging` section of a config file.
    ///
    /// The file level only applies when no `-v` flag was given.
    pub fn apply_section(&mut self, section: &LoggingSection, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &section.level {
                self.level = level.clone();
            }
        }

        if let Some(format) = &section.format {
            match LogFormat::parse(format) {
                Some(format) => self.format = format,
                None => tracing::warn!("Invalid log format in config: {}, using default", format),
            }
        }

        if section.file.is_some() {
            self.file = section.file.clone();
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        if let Ok(format) = std::env::var("PACKLINT_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(format) => self.format = format,
                None => tracing::warn!("Invalid log format: {}, using default", format),
            }
        }

        if let Ok(file) = std::env::var("PACKLINT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }

        if let Ok(console) = std::env::var("PACKLINT_LOG_CONSOLE") {
            self.console = console.to_lowercase() == "true" || console == "1";
        }
    }
}

/// Pick where log lines go: the log file, stderr, or nowhere
fn make_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, bool)> {
    if let Some(file) = &config.file {
        let directory = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = file
            .file_name()
            .ok_or_else(|| Error::config(format!("Invalid log file path: {}", file.display())))?;

        std::fs::create_dir_all(&directory)?;
        let appender = tracing_appender::rolling::never(directory, file_name);
        return Ok((BoxMakeWriter::new(appender), false));
    }

    if config.console {
        use is_terminal::IsTerminal;
        let ansi = std::io::stderr().is_terminal();
        Ok((BoxMakeWriter::new(std::io::stderr), ansi))
    } else {
        Ok((BoxMakeWriter::new(std::io::sink), false))
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config)?;
    let (writer, ansi) = make_writer(&config)?;
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // Each format produces a different subscriber type
    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .compact()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .json()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Full => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
    }

    let run_id = generate_run_id();
    RUN_ID
        .set(run_id.clone())
        .map_err(|_| Error::other("Logging was already initialized for this run"))?;

    tracing::info!(run_id = %run_id, config = ?config, "Logging system initialized");

    Ok(())
}

/// Create environment filter based on configuration
fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config.level, e)))?;

    if let Some(module_filters) = &config.module_filter {
        for (module, level) in module_filters {
            filter = filter.add_directive(
                format!("{}={}", module, level)
                    .parse()
                    .map_err(|e| Error::other(format!("Invalid filter directive: {}", e)))?,
            );
        }
    }

    Ok(filter)
}

/// Generate a unique run ID for this invocation
pub fn generate_run_id() -> String {
    format!("run_{}", Uuid::new_v4().simple())
}

/// Get the current run ID
pub fn current_run_id() -> Option<&'static str> {
    RUN_ID.get().map(|s| s.as_str())
}

/// Create a span with run ID and timing
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        run_id = current_run_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that logs its duration when finished or dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
        finished: bool,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self::start(operation, None)
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self::start(operation, Some(details))
        }

        fn start(operation: &str, details: Option<&str>) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, details),
                operation: operation.to_string(),
                finished: false,
            }
        }

        /// Finish the timer and log the duration
        pub fn finish(mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);
            self.finished = true;

            tracing::info!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            if self.finished {
                return;
            }
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed (auto-timed)"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
        assert!(config.span_events);
    }

    #[test]
    fn test_config_section_respects_verbosity() {
        let section = LoggingSection {
            level: Some("error".to_string()),
            format: Some("json".to_string()),
            file: Some(PathBuf::from("logs/packlint.log")),
        };

        let mut quiet = LoggingConfig::from_verbosity(0);
        quiet.apply_section(&section, 0);
        assert_eq!(quiet.level, "error");
        assert_eq!(quiet.format, LogFormat::Json);
        assert_eq!(quiet.file, Some(PathBuf::from("logs/packlint.log")));

        let mut verbose = LoggingConfig::from_verbosity(2);
        verbose.apply_section(&section, 2);
        assert_eq!(verbose.level, "debug");
    }

    #[test]
    fn test_run_id_format() {
        let id = generate_run_id();
        assert!(id.starts_with("run_"));
        assert_eq!(id.len(), "run_".len() + 32);
        assert_ne!(id, generate_run_id());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let config = LoggingConfig {
            level: "packlint=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(create_env_filter(&config), Err(Error::Config(_))));
    }
}
