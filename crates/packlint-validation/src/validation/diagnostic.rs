//! Diagnostics and per-run outcomes
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a reported violation was treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Blocking; the run is invalid
    Error,
    /// Downgraded by warning-mode or an advisory code
    Warning,
    /// Code is on the active ignore-list
    Suppressed,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Error => write!(f, "error"),
            Disposition::Warning => write!(f, "warning"),
            Disposition::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// One reported violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Catalog code
    pub code: String,
    /// Rendered message
    pub message: String,
    /// File the violation belongs to
    pub file_path: String,
    /// Final treatment
    pub disposition: Disposition,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.disposition == Disposition::Error
    }

    pub fn is_warning(&self) -> bool {
        self.disposition == Disposition::Warning
    }

    pub fn is_suppressed(&self) -> bool {
        self.disposition == Disposition::Suppressed
    }
}

/// `<path>: [<code>] <message>`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {}", self.file_path, self.code, self.message)
    }
}

/// Result of one validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// File that was validated
    pub file_path: String,
    /// Overall validity
    pub is_valid: bool,
    /// Diagnostics in the order they were reported
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationOutcome {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn suppressed(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_suppressed())
    }

    /// Codes in report order
    pub fn codes(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    /// Find the first diagnostic with a code
    pub fn diagnostic(&self, code: &str) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(code: &str, disposition: Disposition) -> Diagnostic {
        Diagnostic {
            code: code.to_string(),
            message: "message".to_string(),
            file_path: "Packs/Foo/CorrelationRules/rule.yml".to_string(),
            disposition,
        }
    }

    #[test]
    fn test_display_line() {
        let d = diagnostic("CR101", Disposition::Error);
        assert_eq!(
            d.to_string(),
            "Packs/Foo/CorrelationRules/rule.yml: [CR101] message"
        );
    }

    #[test]
    fn test_outcome_filters() {
        let outcome = ValidationOutcome {
            file_path: "rule.yml".to_string(),
            is_valid: false,
            diagnostics: vec![
                diagnostic("CR100", Disposition::Error),
                diagnostic("CR101", Disposition::Suppressed),
                diagnostic("BA102", Disposition::Warning),
            ],
        };

        assert_eq!(outcome.errors().count(), 1);
        assert_eq!(outcome.warnings().count(), 1);
        assert_eq!(outcome.suppressed().count(), 1);
        assert_eq!(outcome.codes(), vec!["CR100", "CR101", "BA102"]);
        assert!(outcome.diagnostic("CR101").unwrap().is_suppressed());
    }

    #[test]
    fn test_disposition_serializes_lowercase() {
        let json = serde_json::to_string(&Disposition::Suppressed).unwrap();
        assert_eq!(json, "\"suppressed\"");
    }
}
