//! Validators built against a catalog that lacks their codes

use packlint_validation::{
    Category, ContentEntity, ContentKind, CorrelationRuleValidator, ErrorCatalog, ParsingRuleValidator,
    ValidationContext, ValidationError,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_missing_code_fails_at_construction() {
    let catalog = ErrorCatalog::empty()
        .with_code("CR100", "hyphen", Category::Blocking)
        .unwrap();
    let entity = ContentEntity::new(json!({}), "correlation_rule-a.yml", ContentKind::CorrelationRule);

    let result = CorrelationRuleValidator::new(&entity, ValidationContext::new(entity.file_path()), Arc::new(catalog));
    match result {
        Err(err) => {
            assert!(err.is_unknown_code());
            assert!(err.to_string().contains("CR101"));
        }
        Ok(_) => panic!("validator built with a missing code"),
    }
}

#[test]
fn test_empty_catalog_rejects_every_validator() {
    let entity = ContentEntity::new(json!({}), "parsing_rule-a.yml", ContentKind::ParsingRule);
    let result = ParsingRuleValidator::new(
        &entity,
        ValidationContext::new(entity.file_path()),
        Arc::new(ErrorCatalog::empty()),
    );
    assert!(matches!(result, Err(ValidationError::Catalog(_))));
}

#[test]
fn test_custom_templates_are_used() {
    use packlint_validation::ContentValidator;

    let catalog = ErrorCatalog::empty()
        .with_code("CR100", "starts with a dash", Category::Blocking)
        .and_then(|c| c.with_code("CR101", "bad name {0}", Category::Advisory))
        .and_then(|c| c.with_code("BA102", "odd extension", Category::Advisory))
        .unwrap();
    let entity = ContentEntity::new(json!({"global_rule_id": "x"}), "wrongname.json", ContentKind::CorrelationRule);
    let mut validator =
        CorrelationRuleValidator::new(&entity, ValidationContext::new(entity.file_path()), Arc::new(catalog))
            .unwrap();

    // CR101 is advisory in this catalog
    assert!(validator.is_valid_file(true, false, false).unwrap());
    let outcome = validator.outcome();
    assert_eq!(outcome.diagnostics[0].message, "bad name wrongname.json");
    assert!(outcome.diagnostics[0].is_warning());
}
