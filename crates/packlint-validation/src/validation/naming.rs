//! File naming conventions per content kind
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::validation::entity::{ContentEntity, ContentKind};
use crate::validation::error::{ValidationError, ValidationResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Acceptable base names for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingExpectation {
    /// The stem must start with one of these
    pub prefixes: Vec<String>,
    /// Or be exactly one of these
    pub exact_stems: Vec<String>,
}

impl NamingExpectation {
    pub fn accepts(&self, stem: &str) -> bool {
        self.prefixes.iter().any(|prefix| stem.starts_with(prefix.as_str()))
            || self.exact_stems.iter().any(|exact| exact == stem)
    }

    /// Human readable list used in diagnostics
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .prefixes
            .iter()
            .map(|prefix| format!("`{}`", prefix))
            .collect();
        parts.extend(self.exact_stems.iter().map(|exact| format!("exactly `{}`", exact)));
        parts.join(", ")
    }
}

impl fmt::Display for NamingExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Derives the acceptable file names for an entity
pub trait NamingRule: Send + Sync {
    /// Rule name for logs
    fn name(&self) -> &'static str;

    fn expectation(&self, entity: &ContentEntity) -> NamingExpectation;

    /// Whether the file stem satisfies the expectation
    fn accepts(&self, entity: &ContentEntity) -> bool {
        entity
            .file_stem()
            .is_some_and(|stem| self.expectation(entity).accepts(stem))
    }
}

/// `<pack>_...`, `<kind>_...`, `<kind>-...`, or the declared identifier
#[derive(Debug, Clone, Copy, Default)]
pub struct PackPrefixRule;

impl NamingRule for PackPrefixRule {
    fn name(&self) -> &'static str {
        "pack_prefix"
    }

    fn expectation(&self, entity: &ContentEntity) -> NamingExpectation {
        let kind = entity.kind().as_str();
        let mut prefixes = Vec::with_capacity(3);
        if let Some(pack) = entity.pack_name() {
            prefixes.push(format!("{}_", pack));
        }
        prefixes.push(format!("{}_", kind));
        prefixes.push(format!("{}-", kind));

        NamingExpectation {
            prefixes,
            exact_stems: entity.declared_id().map(str::to_string).into_iter().collect(),
        }
    }
}

/// Naming rule per content kind
#[derive(Clone, Default)]
pub struct NamingRegistry {
    rules: BTreeMap<ContentKind, Arc<dyn NamingRule>>,
}

impl NamingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`PackPrefixRule`] for every built-in kind
    pub fn builtin() -> Self {
        ContentKind::ALL
            .into_iter()
            .fold(Self::new(), |registry, kind| registry.with_rule(kind, PackPrefixRule))
    }

    /// Register or replace the rule for a kind
    pub fn register(&mut self, kind: ContentKind, rule: impl NamingRule + 'static) {
        self.rules.insert(kind, Arc::new(rule));
    }

    pub fn with_rule(mut self, kind: ContentKind, rule: impl NamingRule + 'static) -> Self {
        self.register(kind, rule);
        self
    }

    pub fn rule_for(&self, kind: ContentKind) -> ValidationResult<Arc<dyn NamingRule>> {
        self.rules
            .get(&kind)
            .cloned()
            .ok_or(ValidationError::MissingNamingRule { kind })
    }
}

impl fmt::Debug for NamingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|(kind, rule)| (kind, rule.name())))
            .finish()
    }
}
