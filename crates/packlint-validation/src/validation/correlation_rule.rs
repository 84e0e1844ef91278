//! Correlation rule validation
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::catalog::ErrorCatalog;
use crate::validation::base::{
    ensure_kind, Check, ContentEntityValidator, ContentValidator, RunState,
};
use crate::validation::checks::{FileNamingConvention, KnownExtension, NoLeadingHyphen};
use crate::validation::context::ValidationContext;
use crate::validation::diagnostic::ValidationOutcome;
use crate::validation::entity::{ContentEntity, ContentKind};
use crate::validation::error::ValidationResult;
use crate::validation::naming::NamingRegistry;
use std::sync::Arc;
use tracing::debug;

/// Validator for files under `CorrelationRules/`.
///
/// Only the leading-hyphen and naming checks (plus the advisory extension
/// check) run. Rule content itself is always accepted: this leniency is
/// deliberate and must not be tightened here. Content checks for correlation
/// rules are a separate follow-up and will land as checks of their own.
pub struct CorrelationRuleValidator<'e> {
    runner: ContentEntityValidator<'e>,
}

impl<'e> CorrelationRuleValidator<'e> {
    pub const LEADING_HYPHEN: &'static str = "CR100";
    pub const NAMING: &'static str = "CR101";

    pub fn new(
        entity: &'e ContentEntity,
        context: ValidationContext,
        catalog: Arc<ErrorCatalog>,
    ) -> ValidationResult<Self> {
        Self::with_naming(entity, context, catalog, &NamingRegistry::builtin())
    }

    pub fn with_naming(
        entity: &'e ContentEntity,
        context: ValidationContext,
        catalog: Arc<ErrorCatalog>,
        naming: &NamingRegistry,
    ) -> ValidationResult<Self> {
        ensure_kind(entity, ContentKind::CorrelationRule)?;

        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(NoLeadingHyphen::new(Self::LEADING_HYPHEN)),
            Box::new(FileNamingConvention::new(
                Self::NAMING,
                naming.rule_for(ContentKind::CorrelationRule)?,
            )),
            Box::new(KnownExtension),
        ];

        Ok(Self {
            runner: ContentEntityValidator::new(entity, context, catalog, checks)?,
        })
    }

    /// `CR100`: the YAML must not start with a hyphen
    pub fn no_leading_hyphen(&self) -> ValidationResult<bool> {
        self.runner.run_check("no_leading_hyphen")
    }

    /// `CR101`: the file name follows the pack naming convention
    pub fn is_files_naming_correct(&self) -> ValidationResult<bool> {
        self.runner.run_check("is_files_naming_correct")
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        self.runner.into_outcome()
    }
}

impl ContentValidator for CorrelationRuleValidator<'_> {
    fn kind(&self) -> ContentKind {
        ContentKind::CorrelationRule
    }

    /// The release-notes, new-file and version-control flags are ignored.
    fn is_valid_file(
        &mut self,
        _validate_release_notes: bool,
        _is_new_file: bool,
        _use_version_control: bool,
    ) -> ValidationResult<bool> {
        debug!(
            file_path = self.runner.entity().file_path(),
            "Correlation rule content is accepted as-is; only structure and naming are checked"
        );
        self.runner.run_all()
    }

    /// Correlation rules carry no version of their own
    fn is_valid_version(&self) -> bool {
        true
    }

    fn outcome(&self) -> ValidationOutcome {
        self.runner.outcome()
    }

    fn state(&self) -> RunState {
        self.runner.state()
    }
}
