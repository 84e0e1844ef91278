//! Canonical correlation-rule scenarios
//!
//! Each scenario pairs a document and file name with the ignore-list to apply
//! and the diagnostics a correlation-rule validator must produce.
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::repo::{ContentRepo, ContentRepoBuilder};
use crate::Result;
use packlint_validation::{ContentEntity, ContentKind, Disposition, IgnoreList};
use serde_json::{json, Value};

/// Pack the scenario repository puts every file in
pub const SCENARIO_PACK: &str = "Scenarios";

/// One expected validation run
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub file_name: &'static str,
    pub document: Value,
    /// Codes ignored for this file only
    pub ignored: Vec<&'static str>,
    pub expected_valid: bool,
    /// Expected diagnostics in report order
    pub expected: Vec<(&'static str, Disposition)>,
}

impl Scenario {
    /// The scenario as an in-memory correlation rule at `file_name`
    pub fn entity(&self) -> ContentEntity {
        ContentEntity::new(self.document.clone(), self.file_name, ContentKind::CorrelationRule)
    }

    /// Ignore-list scoped to this scenario's file
    pub fn ignore_list(&self) -> IgnoreList {
        self.ignored
            .iter()
            .fold(IgnoreList::new(), |list, code| list.ignore_for(self.file_name, *code))
    }

    /// Expected codes in report order
    pub fn expected_codes(&self) -> Vec<&'static str> {
        self.expected.iter().map(|(code, _)| *code).collect()
    }
}

/// The five reference scenarios
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "well_formed",
            file_name: "correlation_rule-good.json",
            document: json!({"global_rule_id": "x", "name": "y"}),
            ignored: vec![],
            expected_valid: true,
            expected: vec![],
        },
        Scenario {
            name: "sequence_root",
            file_name: "correlation_rule-sequence.json",
            document: json!([{"a": 1}]),
            ignored: vec![],
            expected_valid: false,
            expected: vec![("CR100", Disposition::Error)],
        },
        Scenario {
            name: "wrong_name",
            file_name: "wrongname.json",
            document: json!({"global_rule_id": "x", "name": "y"}),
            ignored: vec![],
            expected_valid: false,
            expected: vec![("CR101", Disposition::Error)],
        },
        Scenario {
            name: "wrong_name_ignored",
            file_name: "ignoredname.json",
            document: json!({"global_rule_id": "x", "name": "y"}),
            ignored: vec!["CR101"],
            expected_valid: true,
            expected: vec![("CR101", Disposition::Suppressed)],
        },
        Scenario {
            name: "both_violations",
            file_name: "bad.json",
            document: json!([{"a": 1}]),
            ignored: vec![],
            expected_valid: false,
            expected: vec![("CR100", Disposition::Error), ("CR101", Disposition::Error)],
        },
    ]
}

/// Builder preloaded with every scenario under `Packs/Scenarios/CorrelationRules`
pub fn scenario_builder() -> Result<ContentRepoBuilder> {
    scenarios()
        .into_iter()
        .try_fold(ContentRepo::builder(), |builder, scenario| {
            builder.entity(
                SCENARIO_PACK,
                ContentKind::CorrelationRule,
                scenario.file_name,
                scenario.document,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_have_unique_files() {
        let all = scenarios();
        let mut names: Vec<&str> = all.iter().map(|s| s.file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_ignore_list_is_file_scoped() {
        let scenario = scenarios()
            .into_iter()
            .find(|s| s.name == "wrong_name_ignored")
            .unwrap();
        let ignored = scenario.ignore_list();
        assert!(ignored.is_ignored("CR101", "Packs/Scenarios/CorrelationRules/ignoredname.json"));
        assert!(!ignored.is_ignored("CR101", "wrongname.json"));
    }
}
