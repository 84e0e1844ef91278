//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use packlint_validation::{Category, ContentKind};
use std::path::PathBuf;

/// Packlint - validate content packs against the error catalog
///
/// Checks correlation, parsing and modeling rule files for structural and
/// naming problems, honoring per-project ignore-lists and warning-mode.
#[derive(Parser, Debug)]
#[command(
    name = "packlint",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PACKLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate content files or whole content directories
    Validate(ValidateArgs),

    /// List the error codes packlint can report
    Codes(CodesArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Files or directories to validate (JSON or YAML)
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Treat every file as this kind instead of inferring it
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Ignore an error code, either everywhere (`CR101`) or for one file
    /// (`wrongname.json:CR101`); can be repeated
    #[arg(long = "ignore", value_name = "[PATH:]CODE", value_parser = parse_ignore_entry)]
    pub ignore: Vec<IgnoreEntry>,

    /// Report every violation as a warning
    #[arg(short, long)]
    pub warnings: bool,

    /// Do not list suppressed violations
    #[arg(long)]
    pub silence_suppressed: bool,

    /// Stop after the first invalid file
    #[arg(long)]
    pub fail_fast: bool,

    /// Stop after this many errors (0 = unlimited)
    #[arg(long)]
    pub max_errors: Option<usize>,

    /// Number of files validated concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// One `--ignore` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreEntry {
    /// `global` or a file path
    pub scope: String,
    pub code: String,
}

/// Parse `CODE` or `PATH:CODE`
pub fn parse_ignore_entry(value: &str) -> Result<IgnoreEntry, String> {
    let (scope, code) = match value.rsplit_once(':') {
        Some((scope, code)) if !scope.is_empty() => (scope, code),
        Some(_) => return Err(format!("missing path before ':' in '{}'", value)),
        None => (packlint_validation::validation::GLOBAL_SCOPE, value),
    };

    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("'{}' is not an error code", code));
    }

    Ok(IgnoreEntry {
        scope: scope.to_string(),
        code: code.to_ascii_uppercase(),
    })
}

/// Arguments for the codes command
#[derive(Parser, Debug)]
pub struct CodesArgs {
    /// Only list codes of this category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default project configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// File format of the new config
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Write to this path instead of the project default
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl ConfigFormat {
    /// Project config file name for this format
    pub fn project_file_name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "packlint.toml",
            ConfigFormat::Json => ".packlint.json",
            ConfigFormat::Yaml => ".packlint.yaml",
        }
    }
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Content kinds selectable on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    CorrelationRule,
    ParsingRule,
    ModelingRule,
}

/// Error code categories
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Blocking,
    Advisory,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::CorrelationRule => ContentKind::CorrelationRule,
            KindArg::ParsingRule => ContentKind::ParsingRule,
            KindArg::ModelingRule => ContentKind::ModelingRule,
        }
    }
}

impl From<CategoryArg> for Category {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Blocking => Category::Blocking,
            CategoryArg::Advisory => Category::Advisory,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
