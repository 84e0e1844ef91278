//! Validation of content items against the error catalog
//!
//! Each content kind has a validator built from an ordered list of checks:
//!
//! - **Correlation rules**: leading hyphen (`CR100`), naming (`CR101`)
//! - **Parsing rules**: root mapping (`PR100`), naming (`PR101`)
//! - **Modeling rules**: root mapping (`MR100`), naming (`MR101`)
//!
//! Every validator finishes with the advisory extension check (`BA102`).
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod checks;
pub mod context;
pub mod correlation_rule;
pub mod diagnostic;
pub mod entity;
pub mod error;
pub mod modeling_rule;
pub mod naming;
pub mod parsing_rule;

// Re-export commonly used types
pub use base::{Check, CheckTable, ContentEntityValidator, ContentValidator, DiagnosticSink, Reporter, RunState};
pub use context::{IgnoreList, ValidationContext, GLOBAL_SCOPE};
pub use correlation_rule::CorrelationRuleValidator;
pub use diagnostic::{Diagnostic, Disposition, ValidationOutcome};
pub use entity::{ContentEntity, ContentKind};
pub use error::{ValidationError, ValidationResult};
pub use modeling_rule::ModelingRuleValidator;
pub use naming::{NamingExpectation, NamingRegistry, NamingRule, PackPrefixRule};
pub use parsing_rule::ParsingRuleValidator;

use crate::catalog::ErrorCatalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the validator for an entity's kind
pub fn validator_for<'e>(
    entity: &'e ContentEntity,
    context: ValidationContext,
    catalog: Arc<ErrorCatalog>,
    naming: &NamingRegistry,
) -> ValidationResult<Box<dyn ContentValidator + 'e>> {
    let validator: Box<dyn ContentValidator + 'e> = match entity.kind() {
        ContentKind::CorrelationRule => Box::new(CorrelationRuleValidator::with_naming(
            entity, context, catalog, naming,
        )?),
        ContentKind::ParsingRule => Box::new(ParsingRuleValidator::with_naming(
            entity, context, catalog, naming,
        )?),
        ContentKind::ModelingRule => Box::new(ModelingRuleValidator::with_naming(
            entity, context, catalog, naming,
        )?),
    };
    Ok(validator)
}

/// Validation configuration shared by every item of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Codes to suppress, globally or per file
    pub ignored_errors: IgnoreList,
    /// Downgrade blocking violations to warnings
    pub print_as_warnings: bool,
    /// Keep suppressed violations in the outcome
    pub record_suppressed: bool,
    /// Stop after the first invalid item
    pub fail_fast: bool,
    /// Stop once this many blocking diagnostics were collected (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            ignored_errors: IgnoreList::new(),
            print_as_warnings: false,
            record_suppressed: true,
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored_errors(mut self, ignored_errors: IgnoreList) -> Self {
        self.ignored_errors = ignored_errors;
        self
    }

    pub fn with_print_as_warnings(mut self, enabled: bool) -> Self {
        self.print_as_warnings = enabled;
        self
    }

    pub fn with_record_suppressed(mut self, enabled: bool) -> Self {
        self.record_suppressed = enabled;
        self
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Per-item context for `file_path`
    pub fn context_for(&self, file_path: &str) -> ValidationContext {
        ValidationContext::new(file_path)
            .with_ignored(&self.ignored_errors)
            .with_print_as_warnings(self.print_as_warnings)
            .with_record_suppressed(self.record_suppressed)
    }
}

/// Validate one entity with a fresh validator
pub fn validate_entity(
    entity: &ContentEntity,
    config: &ValidationConfig,
    catalog: Arc<ErrorCatalog>,
) -> ValidationResult<ValidationOutcome> {
    validate_entity_with(entity, config, catalog, &NamingRegistry::builtin())
}

/// Validate one entity using custom naming rules
pub fn validate_entity_with(
    entity: &ContentEntity,
    config: &ValidationConfig,
    catalog: Arc<ErrorCatalog>,
    naming: &NamingRegistry,
) -> ValidationResult<ValidationOutcome> {
    let context = config.context_for(entity.file_path());
    let mut validator = validator_for(entity, context, catalog, naming)?;
    validator.is_valid_file(true, false, false)?;
    Ok(validator.outcome())
}

/// Outcomes of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-file outcomes in input order
    pub outcomes: Vec<ValidationOutcome>,
    /// Whether `fail_fast` or `max_errors` cut the run short
    pub stopped_early: bool,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ValidationOutcome) {
        self.outcomes.push(outcome);
    }

    /// True when every outcome is valid
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_valid)
    }

    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn invalid_files(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_valid)
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.errors().count()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.warnings().count()).sum()
    }

    pub fn suppressed_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.suppressed().count()).sum()
    }

    /// Whether the configured limits say to stop after the last push
    pub fn should_stop(&self, config: &ValidationConfig) -> bool {
        let last_invalid = self.outcomes.last().is_some_and(|o| !o.is_valid);
        (config.fail_fast && last_invalid)
            || (config.max_errors > 0 && self.error_count() >= config.max_errors)
    }
}

/// Validate many entities, each with its own validator instance
pub fn validate_entities(
    entities: &[ContentEntity],
    config: &ValidationConfig,
    catalog: Arc<ErrorCatalog>,
) -> ValidationResult<BatchReport> {
    let mut report = BatchReport::new();

    for entity in entities {
        report.push(validate_entity(entity, config, Arc::clone(&catalog))?);

        if report.should_stop(config) {
            warn!(
                file_path = entity.file_path(),
                remaining = entities.len() - report.files_checked(),
                "Stopping batch validation early"
            );
            report.stopped_early = report.files_checked() < entities.len();
            break;
        }
    }

    info!(
        files = report.files_checked(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "Batch validation finished"
    );
    Ok(report)
}
