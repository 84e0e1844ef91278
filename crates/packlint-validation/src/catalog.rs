//! Error catalog mapping stable codes to message templates and categories
//!
//! The catalog is built once and shared read-only (usually behind an `Arc`)
//! by every validator. Codes are never reused for a different meaning.
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Whether a violation blocks validity by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Fails the run unless ignored or downgraded
    Blocking,
    /// Always reported as a warning
    Advisory,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Blocking => write!(f, "blocking"),
            Category::Advisory => write!(f, "advisory"),
        }
    }
}

/// Errors raised by catalog lookups and registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The code was never registered
    #[error("Unknown error code '{code}': it is not registered in the error catalog")]
    UnknownCode { code: String },

    /// The code is already registered with another template
    #[error("Error code '{code}' is already registered")]
    DuplicateCode { code: String },
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode {
    /// Stable short identifier, e.g. `CR100`
    pub code: String,
    /// Message template with positional `{0}`, `{1}`... placeholders
    pub template: String,
    /// Default category
    pub category: Category,
}

impl ErrorCode {
    /// Render the template with positional arguments.
    ///
    /// Placeholders without a matching argument are left untouched, so the
    /// output is a pure function of the template and the arguments.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    match key.parse::<usize>().ok().and_then(|i| args.get(i)) {
                        Some(arg) => out.push_str(arg.as_ref()),
                        None => {
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Join list arguments the way every catalog message expects them
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

const BUILTIN_CODES: &[(&str, Category, &str)] = &[
    (
        "BA102",
        Category::Advisory,
        "File {0} has the extension '{1}', which is not one of the accepted document extensions: {2}",
    ),
    (
        "CR100",
        Category::Blocking,
        "Correlation rules files should not start with a hyphen, please remove it.",
    ),
    (
        "CR101",
        Category::Blocking,
        "The following correlation rules files do not match the naming conventions: {0}. File names must start with one of: {1}",
    ),
    (
        "MR100",
        Category::Blocking,
        "Modeling rules file {0} must contain a mapping at its root, found a {1}.",
    ),
    (
        "MR101",
        Category::Blocking,
        "The following modeling rules files do not match the naming conventions: {0}. File names must start with one of: {1}",
    ),
    (
        "PR100",
        Category::Blocking,
        "Parsing rules file {0} must contain a mapping at its root, found a {1}.",
    ),
    (
        "PR101",
        Category::Blocking,
        "The following parsing rules files do not match the naming conventions: {0}. File names must start with one of: {1}",
    ),
];

/// Immutable lookup table of error codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCatalog {
    codes: BTreeMap<String, ErrorCode>,
}

impl ErrorCatalog {
    /// Create a catalog with no codes, for tests and custom suites
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the catalog of every code shipped with packlint
    pub fn builtin() -> Self {
        let codes = BUILTIN_CODES
            .iter()
            .map(|(code, category, template)| {
                (
                    code.to_string(),
                    ErrorCode {
                        code: code.to_string(),
                        template: template.to_string(),
                        category: *category,
                    },
                )
            })
            .collect();

        Self { codes }
    }

    /// Register a new code
    pub fn register(
        &mut self,
        code: impl Into<String>,
        template: impl Into<String>,
        category: Category,
    ) -> Result<(), CatalogError> {
        let code = code.into();
        if self.codes.contains_key(&code) {
            return Err(CatalogError::DuplicateCode { code });
        }

        self.codes.insert(
            code.clone(),
            ErrorCode {
                code,
                template: template.into(),
                category,
            },
        );
        Ok(())
    }

    /// Builder-style registration
    pub fn with_code(
        mut self,
        code: impl Into<String>,
        template: impl Into<String>,
        category: Category,
    ) -> Result<Self, CatalogError> {
        self.register(code, template, category)?;
        Ok(self)
    }

    /// Look up a code
    pub fn resolve(&self, code: &str) -> Result<&ErrorCode, CatalogError> {
        self.codes.get(code).ok_or_else(|| CatalogError::UnknownCode {
            code: code.to_string(),
        })
    }

    /// Resolve a code and render its message
    pub fn render<S: AsRef<str>>(&self, code: &str, args: &[S]) -> Result<String, CatalogError> {
        Ok(self.resolve(code)?.render(args))
    }

    /// Check whether a code is registered
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the catalog has no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate entries in code order
    pub fn iter(&self) -> impl Iterator<Item = &ErrorCode> {
        self.codes.values()
    }
}
