//! Correlation rule scenarios
//!
//! End-to-end runs of the correlation rule validator covering structure,
//! naming, ignore-lists and warning-mode.

use packlint_validation::{
    ContentEntity, ContentKind, ContentValidator, CorrelationRuleValidator, Disposition, ErrorCatalog,
    IgnoreList, RunState, ValidationContext, ValidationError, ValidationOutcome,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn run(document: Value, path: &str, context: ValidationContext) -> (bool, ValidationOutcome) {
    let entity = ContentEntity::new(document, path, ContentKind::CorrelationRule);
    let mut validator =
        CorrelationRuleValidator::new(&entity, context, Arc::new(ErrorCatalog::builtin())).unwrap();
    let is_valid = validator.is_valid_file(true, false, false).unwrap();
    (is_valid, validator.into_outcome())
}

fn run_default(document: Value, path: &str) -> (bool, ValidationOutcome) {
    run(document, path, ValidationContext::new(path))
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn test_well_formed_rule_is_valid() {
        let (is_valid, outcome) = run_default(
            json!({"global_rule_id": "x", "name": "y"}),
            "correlation_rule-good.json",
        );
        assert!(is_valid);
        assert!(outcome.is_valid);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_sequence_root_reports_one_structural_violation() {
        let (is_valid, outcome) = run_default(json!([{"a": 1}]), "correlation_rule-list.yml");
        assert!(!is_valid);
        assert_eq!(outcome.codes(), vec!["CR100"]);
        assert!(outcome.diagnostics[0].is_error());
    }

    #[test]
    fn test_sequence_root_in_pack_folder() {
        let (is_valid, outcome) = run_default(
            json!([{"a": 1}]),
            "Packs/Okta/CorrelationRules/Okta_rule.yml",
        );
        assert!(!is_valid);
        assert_eq!(outcome.codes(), vec!["CR100"]);
    }

    #[test]
    fn test_wrong_name_reports_naming_violation() {
        let (is_valid, outcome) = run_default(json!({"global_rule_id": "x", "name": "y"}), "wrongname.json");
        assert!(!is_valid);
        assert_eq!(outcome.codes(), vec!["CR101"]);
        assert!(outcome.diagnostics[0].message.contains("wrongname.json"));
    }

    #[test]
    fn test_ignored_naming_violation_is_suppressed() {
        let ignored = IgnoreList::new().ignore_for("wrongname.json", "CR101");
        let context = ValidationContext::new("wrongname.json").with_ignored(&ignored);
        let (is_valid, outcome) = run(json!({"global_rule_id": "x", "name": "y"}), "wrongname.json", context);

        assert!(is_valid);
        assert_eq!(outcome.codes(), vec!["CR101"]);
        assert_eq!(outcome.diagnostics[0].disposition, Disposition::Suppressed);
    }

    #[test]
    fn test_both_violations_are_reported() {
        let (is_valid, outcome) = run_default(json!([{"a": 1}]), "wrongname.json");
        assert!(!is_valid);
        assert_eq!(outcome.codes(), vec!["CR100", "CR101"]);
        assert!(outcome.diagnostics.iter().all(|d| d.is_error()));
    }
}

#[cfg(test)]
mod configuration {
    use super::*;

    #[test]
    fn test_warning_mode_keeps_file_valid() {
        let context = ValidationContext::new("wrongname.json").with_print_as_warnings(true);
        let (is_valid, outcome) = run(json!([{"a": 1}]), "wrongname.json", context);

        assert!(is_valid);
        assert_eq!(outcome.warnings().count(), 2);
        assert_eq!(outcome.errors().count(), 0);
    }

    #[test]
    fn test_global_ignore_applies_to_any_file() {
        let ignored = IgnoreList::new().ignore_globally("CR100");
        let context = ValidationContext::new("correlation_rule-x.yml").with_ignored(&ignored);
        let (is_valid, outcome) = run(json!([1]), "correlation_rule-x.yml", context);

        assert!(is_valid);
        assert_eq!(outcome.suppressed().count(), 1);
    }

    #[test]
    fn test_ignore_for_other_file_does_not_apply() {
        let ignored = IgnoreList::new().ignore_for("other.json", "CR101");
        let context = ValidationContext::new("wrongname.json").with_ignored(&ignored);
        let (is_valid, outcome) = run(json!({"global_rule_id": "x"}), "wrongname.json", context);

        assert!(!is_valid);
        assert!(outcome.diagnostic("CR101").unwrap().is_error());
    }

    #[test]
    fn test_unknown_extension_is_only_a_warning() {
        let (is_valid, outcome) = run_default(json!({"global_rule_id": "x"}), "correlation_rule-x.txt");
        assert!(is_valid);
        assert_eq!(outcome.codes(), vec!["BA102"]);
        assert!(outcome.diagnostics[0].is_warning());
    }

    #[test]
    fn test_rendered_line_format() {
        let (_, outcome) = run_default(json!([1]), "correlation_rule-x.yml");
        assert_eq!(
            outcome.diagnostics[0].to_string(),
            "correlation_rule-x.yml: [CR100] Correlation rules files should not start with a hyphen, please remove it."
        );
    }
}

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn test_validator_runs_once() {
        let entity = ContentEntity::new(json!({"global_rule_id": "x"}), "x.json", ContentKind::CorrelationRule);
        let mut validator = CorrelationRuleValidator::new(
            &entity,
            ValidationContext::new(entity.file_path()),
            Arc::new(ErrorCatalog::builtin()),
        )
        .unwrap();

        assert_eq!(validator.state(), RunState::Pending);
        assert!(validator.is_valid_file(false, true, true).unwrap());
        assert_eq!(validator.state(), RunState::Done);
        assert!(matches!(
            validator.is_valid_file(false, true, true),
            Err(ValidationError::AlreadyRun { .. })
        ));
        assert!(validator.outcome().diagnostics.is_empty());
    }

    #[test]
    fn test_flags_do_not_change_result() {
        for flags in [(true, false, false), (false, true, true), (true, true, true)] {
            let entity = ContentEntity::new(json!([1]), "wrongname.yml", ContentKind::CorrelationRule);
            let mut validator = CorrelationRuleValidator::new(
                &entity,
                ValidationContext::new(entity.file_path()),
                Arc::new(ErrorCatalog::builtin()),
            )
            .unwrap();
            assert!(!validator.is_valid_file(flags.0, flags.1, flags.2).unwrap());
            assert_eq!(validator.outcome().codes(), vec!["CR100", "CR101"]);
        }
    }
}
