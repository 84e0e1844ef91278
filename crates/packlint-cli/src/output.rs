//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! rendering for validation outcomes, the error catalog and progress bars.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use packlint_validation::{Diagnostic, Disposition, ErrorCode, ValidationOutcome};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format catalog entries
    fn format_codes(&self, codes: &[&ErrorCode]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_codes(&self, codes: &[&ErrorCode]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_codes_human(codes)),
            _ => self.format(&codes),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            // No progress bars with custom writers
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Turn progress indicators off, e.g. when the config disables them
    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// Whether human-readable output is selected
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.is_human() || !formatted.ends_with('\n') {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write one diagnostic line, tagged by disposition (human format only)
    pub fn diagnostic(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        if !self.is_human() || (self.quiet && diagnostic.is_suppressed()) {
            return Ok(());
        }

        let line = if self.use_color {
            let tag = match diagnostic.disposition {
                Disposition::Error => "error".red().bold(),
                Disposition::Warning => "warning".yellow().bold(),
                Disposition::Suppressed => "suppressed".dimmed(),
            };
            format!("  {} {}", tag, diagnostic)
        } else {
            format!("  {} {}", diagnostic.disposition, diagnostic)
        };
        self.writeln(&line)
    }

    /// Write the result of one file as soon as it is known (human format only)
    pub fn outcome(&mut self, outcome: &ValidationOutcome) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        let clean = outcome.diagnostics.is_empty();
        if clean && self.quiet {
            return Ok(());
        }

        let marker = if outcome.is_valid { "✓" } else { "✗" };
        let header = format!("{} {}", marker, outcome.file_path);
        match (self.use_color, outcome.is_valid) {
            (true, true) => self.writeln(&header.green().to_string())?,
            (true, false) => self.writeln(&header.red().to_string())?,
            (false, _) => self.writeln(&header)?,
        }

        for diagnostic in &outcome.diagnostics {
            self.diagnostic(diagnostic)?;
        }
        Ok(())
    }

    /// Write catalog entries
    pub fn codes(&mut self, codes: &[&ErrorCode]) -> Result<()> {
        if self.is_human() {
            let rows = codes
                .iter()
                .map(|code| vec![code.code.clone(), code.category.to_string(), code.template.clone()])
                .collect();
            return self.table(&["CODE", "CATEGORY", "MESSAGE"], rows);
        }

        let formatted = self.format.format_codes(codes)?;
        self.writeln(formatted.trim_end())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Progress bar style for directory runs
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Format catalog entries for human reading
fn format_codes_human(codes: &[&ErrorCode]) -> String {
    codes
        .iter()
        .map(|code| format!("{} ({}) {}\n", code.code, code.category, code.template))
        .collect()
}
