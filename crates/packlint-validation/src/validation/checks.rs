//! Checks shared by the concrete validators
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::catalog::format_list;
use crate::loader::{Format, RootShape};
use crate::validation::base::{Check, Reporter};
use crate::validation::entity::ContentEntity;
use crate::validation::error::ValidationResult;
use crate::validation::naming::NamingRule;
use std::path::Path;
use std::sync::Arc;

/// Fails when the document root is a sequence, i.e. the YAML starts with `-`
#[derive(Debug, Clone, Copy)]
pub struct NoLeadingHyphen {
    code: &'static str,
}

impl NoLeadingHyphen {
    pub fn new(code: &'static str) -> Self {
        Self { code }
    }
}

impl Check for NoLeadingHyphen {
    fn id(&self) -> &'static str {
        "no_leading_hyphen"
    }

    fn codes(&self) -> &[&'static str] {
        std::slice::from_ref(&self.code)
    }

    fn run(&self, entity: &ContentEntity, reporter: &mut Reporter<'_>) -> ValidationResult<bool> {
        if entity.root_shape() != RootShape::Sequence {
            return Ok(true);
        }
        Ok(!reporter.report::<&str>(self.code, &[])?)
    }
}

/// Fails unless the document root is a mapping
#[derive(Debug, Clone, Copy)]
pub struct RootIsMapping {
    code: &'static str,
}

impl RootIsMapping {
    pub fn new(code: &'static str) -> Self {
        Self { code }
    }
}

impl Check for RootIsMapping {
    fn id(&self) -> &'static str {
        "is_root_mapping"
    }

    fn codes(&self) -> &[&'static str] {
        std::slice::from_ref(&self.code)
    }

    fn run(&self, entity: &ContentEntity, reporter: &mut Reporter<'_>) -> ValidationResult<bool> {
        let shape = entity.root_shape();
        if shape == RootShape::Mapping {
            return Ok(true);
        }
        let shape = shape.to_string();
        Ok(!reporter.report(self.code, &[entity.file_path(), shape.as_str()])?)
    }
}

/// Fails when the file stem does not match the kind's naming rule
#[derive(Clone)]
pub struct FileNamingConvention {
    code: &'static str,
    rule: Arc<dyn NamingRule>,
}

impl FileNamingConvention {
    pub fn new(code: &'static str, rule: Arc<dyn NamingRule>) -> Self {
        Self { code, rule }
    }
}

impl Check for FileNamingConvention {
    fn id(&self) -> &'static str {
        "is_files_naming_correct"
    }

    fn codes(&self) -> &[&'static str] {
        std::slice::from_ref(&self.code)
    }

    fn run(&self, entity: &ContentEntity, reporter: &mut Reporter<'_>) -> ValidationResult<bool> {
        if self.rule.accepts(entity) {
            return Ok(true);
        }
        let files = format_list(&[entity.file_path()]);
        let expected = self.rule.expectation(entity).describe();
        Ok(!reporter.report(self.code, &[files, expected])?)
    }
}

/// Advisory: the file extension is not a recognized document format
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownExtension;

impl KnownExtension {
    pub const CODE: &'static str = "BA102";
}

impl Check for KnownExtension {
    fn id(&self) -> &'static str {
        "is_known_extension"
    }

    fn codes(&self) -> &[&'static str] {
        &[Self::CODE]
    }

    fn run(&self, entity: &ContentEntity, reporter: &mut Reporter<'_>) -> ValidationResult<bool> {
        if Format::is_supported(Path::new(entity.file_path())) {
            return Ok(true);
        }
        let extension = entity.extension();
        let accepted = format_list(Format::accepted_extensions());
        Ok(!reporter.report(
            Self::CODE,
            &[entity.file_path(), extension.unwrap_or("<none>"), accepted.as_str()],
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ErrorCatalog;
    use crate::validation::base::DiagnosticSink;
    use crate::validation::context::ValidationContext;
    use crate::validation::entity::ContentKind;
    use crate::validation::naming::PackPrefixRule;
    use serde_json::{json, Value};

    fn run_alone(check: &dyn Check, document: Value, path: &str) -> (bool, DiagnosticSink) {
        let entity = ContentEntity::new(document, path, ContentKind::CorrelationRule);
        let mut sink = DiagnosticSink::new(Arc::new(ErrorCatalog::builtin()), ValidationContext::new(path));
        let passed = {
            let mut reporter = Reporter::new(&mut sink, check.id(), check.codes());
            check.run(&entity, &mut reporter).unwrap()
        };
        (passed, sink)
    }

    #[test]
    fn test_no_leading_hyphen() {
        let check = NoLeadingHyphen::new("CR100");
        let (passed, sink) = run_alone(&check, json!([{"a": 1}]), "correlation_rule-x.yml");
        assert!(!passed);
        assert_eq!(sink.diagnostics()[0].code, "CR100");

        let (passed, sink) = run_alone(&check, json!({"a": 1}), "correlation_rule-x.yml");
        assert!(passed);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_root_is_mapping_rejects_scalar() {
        let check = RootIsMapping::new("PR100");
        let (passed, sink) = run_alone(&check, json!("text"), "parsing_rule-x.yml");
        assert!(!passed);
        assert!(sink.diagnostics()[0].message.contains("found a scalar"));
    }

    #[test]
    fn test_naming_message_lists_file_and_prefixes() {
        let check = FileNamingConvention::new("CR101", Arc::new(PackPrefixRule));
        let (passed, sink) = run_alone(&check, json!({"global_rule_id": "x"}), "wrongname.json");
        assert!(!passed);
        let message = &sink.diagnostics()[0].message;
        assert!(message.contains("wrongname.json"));
        assert!(message.contains("`correlation_rule_`"));
    }

    #[test]
    fn test_unknown_extension_is_advisory() {
        let (passed, sink) = run_alone(&KnownExtension, json!({}), "correlation_rule-x.txt");
        assert!(passed);
        assert!(sink.is_valid());
        assert!(sink.diagnostics()[0].is_warning());
        assert!(sink.diagnostics()[0].message.contains("'txt'"));

        let (_, sink) = run_alone(&KnownExtension, json!({}), "correlation_rule-x");
        assert!(sink.diagnostics()[0].message.contains("<none>"));
    }

    #[test]
    fn test_checks_are_idempotent() {
        let check = NoLeadingHyphen::new("CR100");
        let first = run_alone(&check, json!([1]), "a.yml").0;
        let second = run_alone(&check, json!([1]), "a.yml").0;
        assert_eq!(first, second);
    }
}
