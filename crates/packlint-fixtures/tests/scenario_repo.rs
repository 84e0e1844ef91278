//! Validation of the reference scenarios, in memory and from disk

use packlint_fixtures::{scenario_builder, scenarios, ContentRepo, Scenario, SCENARIO_PACK};
use packlint_validation::{
    discover_documents, validate_entity, ContentKind, Disposition, ErrorCatalog, ValidationConfig,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn dispositions(scenario: &Scenario, file_path: &str) -> (bool, Vec<(String, Disposition)>) {
    let config = ValidationConfig::new().with_ignored_errors(scenario.ignore_list());
    let mut entity = scenario.entity();
    if file_path != scenario.file_name {
        entity = packlint_validation::ContentEntity::new(
            scenario.document.clone(),
            file_path,
            ContentKind::CorrelationRule,
        );
    }

    let outcome = validate_entity(&entity, &config, Arc::new(ErrorCatalog::builtin())).unwrap();
    let found = outcome
        .diagnostics
        .iter()
        .map(|d| (d.code.clone(), d.disposition))
        .collect();
    (outcome.is_valid, found)
}

fn expected(scenario: &Scenario) -> (bool, Vec<(String, Disposition)>) {
    let found = scenario
        .expected
        .iter()
        .map(|(code, disposition)| (code.to_string(), *disposition))
        .collect();
    (scenario.expected_valid, found)
}

#[test]
fn scenarios_in_memory() {
    for scenario in scenarios() {
        assert_eq!(
            dispositions(&scenario, scenario.file_name),
            expected(&scenario),
            "scenario {}",
            scenario.name
        );
    }
}

#[test]
fn scenarios_from_disk() {
    let repo = scenario_builder().unwrap().build().unwrap();

    for scenario in scenarios() {
        let path = repo
            .path_of(PathBuf::from("Packs").join(SCENARIO_PACK).join("CorrelationRules").join(scenario.file_name));
        let path = path.to_string_lossy().into_owned();
        assert_eq!(dispositions(&scenario, &path), expected(&scenario), "scenario {}", scenario.name);
    }
}

#[test]
fn repo_layout_matches_kind_folders() {
    let repo = ContentRepo::builder()
        .entity("Foo", ContentKind::CorrelationRule, "Foo_a.yml", json!({"global_rule_id": "a"}))
        .unwrap()
        .entity("Foo", ContentKind::ParsingRule, "Foo_b.json", json!({"id": "b"}))
        .unwrap()
        .entity("Bar", ContentKind::ModelingRule, "Bar_c.yml", json!({"id": "c"}))
        .unwrap()
        .raw_file(".packlint.yaml", "print_as_warnings: true\n")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(
        repo.list_files().unwrap(),
        vec![
            PathBuf::from(".packlint.yaml"),
            PathBuf::from("Packs/Bar/ModelingRules/Bar_c.yml"),
            PathBuf::from("Packs/Foo/CorrelationRules/Foo_a.yml"),
            PathBuf::from("Packs/Foo/ParsingRules/Foo_b.json"),
        ]
    );

    // Hidden files are not content
    let discovered = discover_documents(repo.root()).unwrap();
    assert_eq!(discovered.len(), 3);
}

#[test]
fn every_entity_from_repo_validates_cleanly() {
    let repo = ContentRepo::builder()
        .entity("Foo", ContentKind::CorrelationRule, "Foo_a.yml", json!({"global_rule_id": "a"}))
        .unwrap()
        .entity("Foo", ContentKind::ParsingRule, "Foo_b.json", json!({"id": "b"}))
        .unwrap()
        .build()
        .unwrap();

    let catalog = Arc::new(ErrorCatalog::builtin());
    for entity in repo.entities().unwrap() {
        let outcome = validate_entity(&entity, &ValidationConfig::default(), Arc::clone(&catalog)).unwrap();
        assert!(outcome.diagnostics.is_empty(), "{:?}", outcome);
    }
}
