//! Modeling rule validation
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::catalog::ErrorCatalog;
use crate::validation::base::{
    ensure_kind, Check, ContentEntityValidator, ContentValidator, RunState,
};
use crate::validation::checks::{FileNamingConvention, KnownExtension, RootIsMapping};
use crate::validation::context::ValidationContext;
use crate::validation::diagnostic::ValidationOutcome;
use crate::validation::entity::{ContentEntity, ContentKind};
use crate::validation::error::ValidationResult;
use crate::validation::naming::NamingRegistry;
use std::sync::Arc;

/// Validator for files under `ModelingRules/`
pub struct ModelingRuleValidator<'e> {
    runner: ContentEntityValidator<'e>,
}

impl<'e> ModelingRuleValidator<'e> {
    pub const ROOT_SHAPE: &'static str = "MR100";
    pub const NAMING: &'static str = "MR101";

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
        ensure_kind(entity, ContentKind::ModelingRule)?;

        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(RootIsMapping::new(Self::ROOT_SHAPE)),
            Box::new(FileNamingConvention::new(
                Self::NAMING,
                naming.rule_for(ContentKind::ModelingRule)?,
            )),
            Box::new(KnownExtension),
        ];

        Ok(Self {
            runner: ContentEntityValidator::new(entity, context, catalog, checks)?,
        })
    }

    /// `MR100`: the document root is a mapping
    pub fn is_root_mapping(&self) -> ValidationResult<bool> {
        self.runner.run_check("is_root_mapping")
    }

    /// `MR101`: the file name follows the pack naming convention
    pub fn is_files_naming_correct(&self) -> ValidationResult<bool> {
        self.runner.run_check("is_files_naming_correct")
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        self.runner.into_outcome()
    }
}

fn is_dotted_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

impl ContentValidator for ModelingRuleValidator<'_> {
    fn kind(&self) -> ContentKind {
        ContentKind::ModelingRule
    }

    /// The release-notes, new-file and version-control flags are ignored.
    fn is_valid_file(
        &mut self,
        _validate_release_notes: bool,
        _is_new_file: bool,
        _use_version_control: bool,
    ) -> ValidationResult<bool> {
        self.runner.run_all()
    }

    /// A declared `fromversion` must be a dotted numeric version
    fn is_valid_version(&self) -> bool {
        match self.runner.entity().declared_field("fromversion") {
            Some(version) => is_dotted_version(version),
            None => true,
        }
    }

    fn outcome(&self) -> ValidationOutcome {
        self.runner.outcome()
    }

    fn state(&self) -> RunState {
        self.runner.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(document: serde_json::Value, path: &str) -> ValidationOutcome {
        let entity = ContentEntity::new(document, path, ContentKind::ModelingRule);
        let mut validator = ModelingRuleValidator::new(
            &entity,
            ValidationContext::new(path),
            Arc::new(ErrorCatalog::builtin()),
        )
        .unwrap();
        validator.is_valid_file(true, false, false).unwrap();
        validator.into_outcome()
    }

    #[test]
    fn test_valid_modeling_rule() {
        let outcome = validate(
            json!({"id": "okta_modeling", "name": "Okta"}),
            "Packs/Okta/ModelingRules/Okta_modeling.yml",
        );
        assert!(outcome.is_valid);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_sequence_root_and_bad_name() {
        let outcome = validate(json!([1, 2]), "Packs/Okta/ModelingRules/rules.yml");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.codes(), vec!["MR100", "MR101"]);
    }

    #[test]
    fn test_flags_do_not_change_result() {
        for (release_notes, new_file, version_control) in [(false, false, false), (true, true, true)] {
            let entity = ContentEntity::new(json!([1]), "Packs/Okta/ModelingRules/rules.yml", ContentKind::ModelingRule);
            let mut validator = ModelingRuleValidator::new(
                &entity,
                ValidationContext::new(entity.file_path()),
                Arc::new(ErrorCatalog::builtin()),
            )
            .unwrap();
            assert!(!validator.is_valid_file(release_notes, new_file, version_control).unwrap());
            assert_eq!(validator.outcome().codes(), vec!["MR100", "MR101"]);
        }
    }

    #[test]
    fn test_named_after_declared_id() {
        let outcome = validate(json!({"id": "rules"}), "Packs/Okta/ModelingRules/rules.yml");
        assert!(outcome.is_valid);
    }

    #[test]
    fn test_fromversion() {
        assert!(is_dotted_version("6.10.0"));
        assert!(!is_dotted_version("6..0"));
        assert!(!is_dotted_version("latest"));

        let entity = ContentEntity::new(
            json!({"id": "x", "fromversion": "8.x"}),
            "modeling_rule-x.yml",
            ContentKind::ModelingRule,
        );
        let validator = ModelingRuleValidator::new(
            &entity,
            ValidationContext::new(entity.file_path()),
            Arc::new(ErrorCatalog::builtin()),
        )
        .unwrap();
        assert!(!validator.is_valid_version());
    }
}
