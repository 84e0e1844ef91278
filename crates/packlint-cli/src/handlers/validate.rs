//! Validation command handler
//!
//! Paths are expanded into content files, each file is loaded and validated
//! on a blocking task, and the per-file outcomes are reported in path order.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{current_run_id, timing::Timer};
use crate::output::OutputWriter;
use packlint_validation::{
    discover_documents, validate_entity, BatchReport, ContentEntity, ContentKind, DocumentParser, ErrorCatalog,
    ValidationConfig, ValidationError, ValidationOutcome,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// What happened to one discovered file
#[derive(Debug)]
enum FileResult {
    /// Validated; the outcome may still be invalid
    Checked(ValidationOutcome),
    /// No content kind could be inferred
    Skipped(PathBuf),
    /// The file could not be read or parsed
    LoadFailed { path: PathBuf, message: String },
}

/// A file that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub file_path: String,
    pub message: String,
}

/// Everything a validate run produced, in input order
#[derive(Debug, Default, Serialize)]
pub struct ValidateSummary {
    pub run_id: Option<String>,
    pub valid: bool,
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub suppressed: usize,
    pub report: BatchReport,
    pub skipped: Vec<String>,
    pub load_failures: Vec<LoadFailure>,
}

impl ValidateSummary {
    fn new(report: BatchReport, skipped: Vec<String>, load_failures: Vec<LoadFailure>) -> Self {
        Self {
            run_id: current_run_id().map(str::to_string),
            valid: report.is_valid() && load_failures.is_empty(),
            files_checked: report.files_checked(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            suppressed: report.suppressed_count(),
            report,
            skipped,
            load_failures,
        }
    }

    /// Files that make the run fail
    fn failed_files(&self) -> usize {
        self.report.invalid_files().count() + self.load_failures.len()
    }
}

/// Handle the validate command
#[instrument(skip_all, fields(paths = args.paths.len(), kind = ?args.kind))]
pub async fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("{} path(s)", args.paths.len()));

    let catalog = Arc::new(ErrorCatalog::builtin());
    for code in config.unknown_ignored_codes(&catalog) {
        warn!(code = %code, "Ignored code is not in the error catalog");
        output.warning(&format!("Ignored code '{}' is not in the error catalog", code))?;
    }

    let settings = config.validation_config(&args);
    let jobs = config.jobs(&args);
    let kind = args.kind.map(ContentKind::from);

    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        output.warning("No content files found")?;
    }
    info!(files = files.len(), jobs, "Starting validation");
    output.info(&format!("Validating {} file(s)", files.len()))?;

    let summary = validate_files(files, kind, settings, catalog, jobs, output).await?;
    write_summary(&summary, output)?;

    if summary.valid {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            files: summary.failed_files(),
            errors: summary.errors + summary.load_failures.len(),
        })
    }
}

/// Expand the given paths into a sorted, de-duplicated list of files
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.clone() });
        }
        files.extend(discover_documents(path)?);
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Load, build and validate one file
fn check_file(
    path: &Path,
    kind: Option<ContentKind>,
    settings: &ValidationConfig,
    catalog: Arc<ErrorCatalog>,
) -> std::result::Result<FileResult, ValidationError> {
    let loaded = match DocumentParser::new().load(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            return Ok(FileResult::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    let entity = match ContentEntity::from_loaded(loaded, kind) {
        Ok(entity) => entity,
        Err(ValidationError::UnknownKind { .. }) => return Ok(FileResult::Skipped(path.to_path_buf())),
        Err(e) => return Err(e),
    };

    validate_entity(&entity, settings, catalog).map(FileResult::Checked)
}

/// Validate files concurrently, at most `jobs` at a time
async fn validate_files(
    files: Vec<PathBuf>,
    kind: Option<ContentKind>,
    settings: ValidationConfig,
    catalog: Arc<ErrorCatalog>,
    jobs: usize,
    output: &mut OutputWriter,
) -> Result<ValidateSummary> {
    let total = files.len();
    let progress = output.progress_bar(total as u64, "Validating");
    let settings = Arc::new(settings);
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));

    let mut set = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let settings = Arc::clone(&settings);
        let catalog = Arc::clone(&catalog);

        set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| Error::Task(e.to_string()))?;

            let result = tokio::task::spawn_blocking(move || check_file(&path, kind, &settings, catalog))
                .await
                .map_err(|e| Error::Task(e.to_string()))??;
            Ok::<_, Error>((index, result))
        });
    }

    // Arrival order decides when to stop; report order is input order
    let mut running = BatchReport::new();
    let mut results: Vec<(usize, FileResult)> = Vec::with_capacity(total);
    let mut stopped = false;

    while let Some(joined) = set.join_next().await {
        let (index, result) = match joined {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                set.shutdown().await;
                return Err(e);
            }
            Err(e) if e.is_cancelled() => continue,
            Err(e) => {
                set.shutdown().await;
                return Err(Error::Task(e.to_string()));
            }
        };

        if let Some(pb) = &progress {
            pb.inc(1);
        }

        match &result {
            FileResult::Checked(outcome) => {
                debug!(file_path = %outcome.file_path, is_valid = outcome.is_valid, "File validated");
                running.push(outcome.clone());
            }
            FileResult::Skipped(path) => {
                warn!(path = %path.display(), "Could not infer content kind, skipping");
            }
            FileResult::LoadFailed { path, message } => {
                warn!(path = %path.display(), error = %message, "Failed to load file");
            }
        }
        results.push((index, result));

        if running.should_stop(&settings) {
            stopped = true;
            set.shutdown().await;
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    results.sort_by_key(|(index, _)| *index);

    let mut report = BatchReport::new();
    let mut skipped = Vec::new();
    let mut load_failures = Vec::new();
    for (_, result) in results {
        match result {
            FileResult::Checked(outcome) => report.push(outcome),
            FileResult::Skipped(path) => skipped.push(path.display().to_string()),
            FileResult::LoadFailed { path, message } => load_failures.push(LoadFailure {
                file_path: path.display().to_string(),
                message,
            }),
        }
    }
    report.stopped_early = stopped && report.files_checked() + skipped.len() + load_failures.len() < total;

    if report.stopped_early {
        warn!(
            checked = report.files_checked(),
            total, "Stopping validation early"
        );
    }

    Ok(ValidateSummary::new(report, skipped, load_failures))
}

/// Print the summary in the selected output format
fn write_summary(summary: &ValidateSummary, output: &mut OutputWriter) -> Result<()> {
    if !output.is_human() {
        return output.data(summary);
    }

    for outcome in &summary.report.outcomes {
        output.outcome(outcome)?;
    }

    for failure in &summary.load_failures {
        output.error(&format!("✗ {}", failure.message))?;
    }

    for path in &summary.skipped {
        output.warning(&format!("Skipped {}: unknown content kind (use --kind)", path))?;
    }

    output.section("Summary")?;
    let line = format!(
        "{} file(s) checked, {} failed: {} error(s), {} warning(s), {} suppressed",
        summary.files_checked,
        summary.failed_files(),
        summary.errors,
        summary.warnings,
        summary.suppressed
    );
    if summary.valid {
        output.success(&format!("✓ {}", line))?;
    } else {
        output.error(&line)?;
    }

    if summary.report.stopped_early {
        output.warning("Stopped early: remaining files were not checked")?;
    }

    Ok(())
}
