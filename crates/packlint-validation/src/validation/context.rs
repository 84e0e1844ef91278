//! Per-validator configuration: ignore-lists and warning-mode
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ignore-list scope that applies to every file
pub const GLOBAL_SCOPE: &str = "global";

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Whether an ignore-list scope covers a file.
///
/// A scope matches the full path, or any trailing run of path components,
/// so `rule.yml` and `CorrelationRules/rule.yml` both cover
/// `Packs/Foo/CorrelationRules/rule.yml`.
fn scope_matches(scope: &str, file_path: &str) -> bool {
    let scope = normalize(scope);
    let scope = scope.trim_start_matches("./");
    let file_path = normalize(file_path);
    let file_path = file_path.trim_start_matches("./");

    !scope.is_empty() && (file_path == scope || file_path.ends_with(&format!("/{}", scope)))
}

/// Error codes the operator chose to suppress, keyed by scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code for a scope (`global` or a file path)
    pub fn insert(&mut self, scope: impl Into<String>, code: impl Into<String>) {
        self.entries
            .entry(scope.into())
            .or_default()
            .insert(code.into());
    }

    /// Ignore a code for every file
    pub fn ignore_globally(mut self, code: impl Into<String>) -> Self {
        self.insert(GLOBAL_SCOPE, code);
        self
    }

    /// Ignore a code for one file
    pub fn ignore_for(mut self, file_path: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(file_path, code);
        self
    }

    /// Whether `code` is ignored for `file_path`
    pub fn is_ignored(&self, code: &str, file_path: &str) -> bool {
        self.entries.iter().any(|(scope, codes)| {
            codes.contains(code) && (scope == GLOBAL_SCOPE || scope_matches(scope, file_path))
        })
    }

    /// Only the entries that apply to `file_path`
    pub fn scoped_to(&self, file_path: &str) -> IgnoreList {
        let entries = self
            .entries
            .iter()
            .filter(|(scope, _)| *scope == GLOBAL_SCOPE || scope_matches(scope, file_path))
            .map(|(scope, codes)| (scope.clone(), codes.clone()))
            .collect();
        Self { entries }
    }

    /// Add every entry of `other`
    pub fn merge(&mut self, other: &IgnoreList) {
        for (scope, codes) in &other.entries {
            self.entries
                .entry(scope.clone())
                .or_default()
                .extend(codes.iter().cloned());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }

    /// Iterate `(scope, codes)` pairs in scope order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(scope, codes)| (scope.as_str(), codes))
    }
}

/// Configuration for one validator instance, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    file_path: String,
    ignored: IgnoreList,
    print_as_warnings: bool,
    record_suppressed: bool,
}

impl ValidationContext {
    /// Context with no ignored codes and warning-mode off
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ignored: IgnoreList::new(),
            print_as_warnings: false,
            record_suppressed: true,
        }
    }

    /// Use an ignore-list, keeping only the entries for this file
    pub fn with_ignored(mut self, ignored: &IgnoreList) -> Self {
        self.ignored = ignored.scoped_to(&self.file_path);
        self
    }

    /// Downgrade every blocking violation to a warning
    pub fn with_print_as_warnings(mut self, enabled: bool) -> Self {
        self.print_as_warnings = enabled;
        self
    }

    /// Whether suppressed violations are still recorded as diagnostics
    pub fn with_record_suppressed(mut self, enabled: bool) -> Self {
        self.record_suppressed = enabled;
        self
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn ignored(&self) -> &IgnoreList {
        &self.ignored
    }

    pub fn print_as_warnings(&self) -> bool {
        self.print_as_warnings
    }

    pub fn record_suppressed(&self) -> bool {
        self.record_suppressed
    }

    /// Whether `code` is ignored for `file_path`
    pub fn is_ignored(&self, code: &str, file_path: &str) -> bool {
        self.ignored.is_ignored(code, file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_matching() {
        assert!(scope_matches("rule.yml", "Packs/Foo/CorrelationRules/rule.yml"));
        assert!(scope_matches("CorrelationRules/rule.yml", "Packs/Foo/CorrelationRules/rule.yml"));
        assert!(scope_matches("./wrongname.json", "wrongname.json"));
        assert!(scope_matches("rule.yml", "Packs\\Foo\\rule.yml"));
        assert!(!scope_matches("ule.yml", "Packs/Foo/rule.yml"));
        assert!(!scope_matches("", "rule.yml"));
    }

    #[test]
    fn test_global_and_file_scopes() {
        let ignored = IgnoreList::new()
            .ignore_globally("BA102")
            .ignore_for("wrongname.json", "CR101");

        assert!(ignored.is_ignored("BA102", "anything.yml"));
        assert!(ignored.is_ignored("CR101", "wrongname.json"));
        assert!(!ignored.is_ignored("CR101", "other.json"));
        assert!(!ignored.is_ignored("CR100", "wrongname.json"));
    }

    #[test]
    fn test_context_scopes_ignore_list_to_file() {
        let ignored = IgnoreList::new()
            .ignore_for("a.yml", "CR101")
            .ignore_for("b.yml", "CR100");

        let context = ValidationContext::new("a.yml").with_ignored(&ignored);
        assert!(context.is_ignored("CR101", "a.yml"));
        assert_eq!(context.ignored().iter().count(), 1);
    }

    #[test]
    fn test_merge_and_deserialize() {
        let mut ignored: IgnoreList =
            serde_yaml::from_str("global: [BA102]\nwrongname.json: [CR101]\n").unwrap();
        ignored.merge(&IgnoreList::new().ignore_globally("CR100"));

        assert!(ignored.is_ignored("CR100", "x.yml"));
        assert!(ignored.is_ignored("BA102", "x.yml"));
        assert!(ignored.is_ignored("CR101", "wrongname.json"));
        assert!(!ignored.is_empty());
    }
}
