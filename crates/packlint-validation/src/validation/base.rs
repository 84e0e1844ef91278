//! Shared check-running machinery for every content kind
//!
//! A concrete validator is an ordered list of [`Check`]s handed to a
//! [`ContentEntityValidator`]. Every violation goes through
//! [`DiagnosticSink::handle_error`], which is the only place ignore-lists and
//! warning-mode are applied.
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::catalog::{Category, ErrorCatalog};
use crate::validation::context::ValidationContext;
use crate::validation::diagnostic::{Diagnostic, Disposition, ValidationOutcome};
use crate::validation::entity::{ContentEntity, ContentKind};
use crate::validation::error::{ValidationError, ValidationResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, debug_span, info};

/// A single named check.
///
/// `run` returns whether this check passed, independently of the validator's
/// running result. A violation that ends up suppressed or downgraded counts
/// as passed.
pub trait Check: Send + Sync {
    /// Stable identifier, unique within one validator
    fn id(&self) -> &'static str;

    /// Codes this check may report
    fn codes(&self) -> &[&'static str];

    /// Inspect the entity and report violations
    fn run(&self, entity: &ContentEntity, reporter: &mut Reporter<'_>) -> ValidationResult<bool>;
}

/// Declaration table from check identifier to the codes it may emit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckTable {
    entries: Vec<(&'static str, Vec<&'static str>)>,
}

impl CheckTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration
    pub fn declare(mut self, check: &'static str, codes: &[&'static str]) -> Self {
        self.entries.push((check, codes.to_vec()));
        self
    }

    /// Build the table from a list of checks
    pub fn from_checks(checks: &[Box<dyn Check>]) -> Self {
        checks
            .iter()
            .fold(Self::new(), |table, check| table.declare(check.id(), check.codes()))
    }

    /// Codes declared for a check
    pub fn codes_for(&self, check: &str) -> Option<&[&'static str]> {
        self.entries
            .iter()
            .find(|(id, _)| *id == check)
            .map(|(_, codes)| codes.as_slice())
    }

    /// Fail fast when a check is declared twice or a code is not in the catalog
    pub fn verify(&self, catalog: &ErrorCatalog) -> ValidationResult<()> {
        let mut seen = HashSet::new();
        for (check, codes) in &self.entries {
            if !seen.insert(*check) {
                return Err(ValidationError::DuplicateCheck {
                    check: check.to_string(),
                });
            }
            for code in codes {
                catalog.resolve(code)?;
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[&'static str])> + '_ {
        self.entries.iter().map(|(id, codes)| (*id, codes.as_slice()))
    }
}

/// Accumulates diagnostics and the running validity of one run
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    catalog: Arc<ErrorCatalog>,
    context: ValidationContext,
    diagnostics: Vec<Diagnostic>,
    is_valid: bool,
}

impl DiagnosticSink {
    pub fn new(catalog: Arc<ErrorCatalog>, context: ValidationContext) -> Self {
        Self {
            catalog,
            context,
            diagnostics: Vec::new(),
            is_valid: true,
        }
    }

    /// Route one violation.
    ///
    /// 1. Ignored code: recorded as suppressed (unless the context silences
    ///    suppressed diagnostics), validity untouched, returns `false`.
    /// 2. Warning-mode or advisory code: recorded as a warning, returns `false`.
    /// 3. Otherwise: recorded as an error, the run becomes invalid, returns `true`.
    pub fn handle_error(
        &mut self,
        message: impl Into<String>,
        code: &str,
        file_path: &str,
    ) -> ValidationResult<bool> {
        let category = self.catalog.resolve(code)?.category;
        let message = message.into();

        if self.context.is_ignored(code, file_path) {
            debug!(code, file_path, "Violation suppressed by ignore-list");
            if self.context.record_suppressed() {
                self.push(message, code, file_path, Disposition::Suppressed);
            }
            return Ok(false);
        }

        if self.context.print_as_warnings() || category == Category::Advisory {
            debug!(code, file_path, %category, "Violation reported as warning");
            self.push(message, code, file_path, Disposition::Warning);
            return Ok(false);
        }

        debug!(code, file_path, "Violation reported as error");
        self.push(message, code, file_path, Disposition::Error);
        self.is_valid = false;
        Ok(true)
    }

    fn push(&mut self, message: String, code: &str, file_path: &str, disposition: Disposition) {
        self.diagnostics.push(Diagnostic {
            code: code.to_string(),
            message,
            file_path: file_path.to_string(),
            disposition,
        });
    }

    /// An empty sink sharing this sink's catalog and context
    pub fn scratch(&self) -> Self {
        Self::new(Arc::clone(&self.catalog), self.context.clone())
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn outcome(&self) -> ValidationOutcome {
        ValidationOutcome {
            file_path: self.context.file_path().to_string(),
            is_valid: self.is_valid,
            diagnostics: self.diagnostics.clone(),
        }
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        ValidationOutcome {
            file_path: self.context.file_path().to_string(),
            is_valid: self.is_valid,
            diagnostics: self.diagnostics,
        }
    }
}

/// A sink handle bound to one check and the codes it declared
pub struct Reporter<'r> {
    sink: &'r mut DiagnosticSink,
    check: &'static str,
    declared: &'r [&'static str],
}

impl<'r> Reporter<'r> {
    pub fn new(sink: &'r mut DiagnosticSink, check: &'static str, declared: &'r [&'static str]) -> Self {
        Self {
            sink,
            check,
            declared,
        }
    }

    fn ensure_declared(&self, code: &str) -> ValidationResult<()> {
        if self.declared.contains(&code) {
            Ok(())
        } else {
            Err(ValidationError::UndeclaredCode {
                check: self.check.to_string(),
                code: code.to_string(),
            })
        }
    }

    /// Render `code` with `args` and report it against the file under test.
    /// Returns `true` when the violation is blocking.
    pub fn report<S: AsRef<str>>(&mut self, code: &str, args: &[S]) -> ValidationResult<bool> {
        self.ensure_declared(code)?;
        let message = self.sink.catalog().render(code, args)?;
        let file_path = self.sink.context().file_path().to_string();
        self.sink.handle_error(message, code, &file_path)
    }

    /// Report a pre-rendered message against an explicit path
    pub fn handle_error(
        &mut self,
        message: impl Into<String>,
        code: &str,
        file_path: &str,
    ) -> ValidationResult<bool> {
        self.ensure_declared(code)?;
        self.sink.handle_error(message, code, file_path)
    }
}

/// Lifecycle of one validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running,
    Done,
}

/// Runs an ordered list of checks over one entity
pub struct ContentEntityValidator<'e> {
    entity: &'e ContentEntity,
    checks: Vec<Box<dyn Check>>,
    sink: DiagnosticSink,
    state: RunState,
}

impl<'e> ContentEntityValidator<'e> {
    /// Build a validator, verifying every declared code against the catalog
    pub fn new(
        entity: &'e ContentEntity,
        context: ValidationContext,
        catalog: Arc<ErrorCatalog>,
        checks: Vec<Box<dyn Check>>,
    ) -> ValidationResult<Self> {
        CheckTable::from_checks(&checks).verify(&catalog)?;

        Ok(Self {
            entity,
            checks,
            sink: DiagnosticSink::new(catalog, context),
            state: RunState::Pending,
        })
    }

    /// Run every check once, in order, and return the final validity.
    ///
    /// Checks after a failure still run; only a catalog/check mismatch
    /// stops the run early.
    pub fn run_all(&mut self) -> ValidationResult<bool> {
        if self.state != RunState::Pending {
            return Err(ValidationError::AlreadyRun {
                file_path: self.entity.file_path().to_string(),
            });
        }

        self.state = RunState::Running;
        let result = self.run_checks();
        self.state = RunState::Done;

        let is_valid = result?;
        info!(
            file_path = self.entity.file_path(),
            kind = %self.entity.kind(),
            is_valid,
            diagnostics = self.sink.diagnostics().len(),
            "Validation finished"
        );
        Ok(is_valid)
    }

    fn run_checks(&mut self) -> ValidationResult<bool> {
        let span = debug_span!("validate", file_path = self.entity.file_path(), kind = %self.entity.kind());
        let _enter = span.enter();

        for check in &self.checks {
            let mut reporter = Reporter::new(&mut self.sink, check.id(), check.codes());
            let passed = check.run(self.entity, &mut reporter)?;
            debug!(check = check.id(), passed, "Check finished");
        }

        Ok(self.sink.is_valid())
    }

    /// Run one named check on its own and return its local result.
    ///
    /// The check reports into a scratch sink, so this run's diagnostics,
    /// validity and state are left as they were.
    pub fn run_check(&self, id: &str) -> ValidationResult<bool> {
        self.run_check_scratch(id).map(|(passed, _)| passed)
    }

    /// Like [`run_check`](Self::run_check), also returning what the check reported
    pub fn run_check_scratch(&self, id: &str) -> ValidationResult<(bool, DiagnosticSink)> {
        let check = self
            .checks
            .iter()
            .find(|check| check.id() == id)
            .ok_or_else(|| ValidationError::UnknownCheck {
                check: id.to_string(),
            })?;

        let mut scratch = self.sink.scratch();
        let mut reporter = Reporter::new(&mut scratch, check.id(), check.codes());
        let passed = check.run(self.entity, &mut reporter)?;
        debug!(check = check.id(), passed, "Single check finished");
        Ok((passed, scratch))
    }

    /// Report a violation directly; see [`DiagnosticSink::handle_error`]
    pub fn handle_error(
        &mut self,
        message: impl Into<String>,
        code: &str,
        file_path: &str,
    ) -> ValidationResult<bool> {
        self.sink.handle_error(message, code, file_path)
    }

    pub fn entity(&self) -> &ContentEntity {
        self.entity
    }

    pub fn context(&self) -> &ValidationContext {
        self.sink.context()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.sink.is_valid()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.sink.diagnostics()
    }

    /// Check identifiers in run order
    pub fn check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.id()).collect()
    }

    pub fn outcome(&self) -> ValidationOutcome {
        self.sink.outcome()
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        self.sink.into_outcome()
    }
}

/// Common surface of the per-kind validators
pub trait ContentValidator {
    /// Kind this validator accepts
    fn kind(&self) -> ContentKind;

    /// Run every check once and return the final validity.
    ///
    /// The flags are hints; a validator that does not use them says so.
    fn is_valid_file(
        &mut self,
        validate_release_notes: bool,
        is_new_file: bool,
        use_version_control: bool,
    ) -> ValidationResult<bool>;

    /// Version-specific checks
    fn is_valid_version(&self) -> bool;

    fn outcome(&self) -> ValidationOutcome;

    fn state(&self) -> RunState;
}

/// Reject an entity given to the wrong validator
pub(crate) fn ensure_kind(entity: &ContentEntity, expected: ContentKind) -> ValidationResult<()> {
    if entity.kind() == expected {
        Ok(())
    } else {
        Err(ValidationError::KindMismatch {
            expected,
            found: entity.kind(),
            file_path: entity.file_path().to_string(),
        })
    }
}
