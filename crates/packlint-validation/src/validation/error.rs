//! Validation error types
//!
//! These are defects in the validator setup or misuse of a validator, not
//! problems with the content being validated. Content problems are reported
//! as diagnostics.
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::catalog::CatalogError;
use crate::validation::entity::ContentKind;
use thiserror::Error;

/// Errors that stop a validation run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A declared or reported code is missing from the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A check reported a code it did not declare
    #[error("Check '{check}' reported code '{code}' which it does not declare")]
    UndeclaredCode { check: String, code: String },

    /// The same check identifier appears twice in one validator
    #[error("Check '{check}' is declared more than once")]
    DuplicateCheck { check: String },

    /// A named check is not part of this validator
    #[error("Check '{check}' is not part of this validator")]
    UnknownCheck { check: String },

    /// `is_valid_file` was called twice on the same instance
    #[error("Validation of '{file_path}' already ran; create a new validator for another run")]
    AlreadyRun { file_path: String },

    /// The entity kind does not match the validator it was given to
    #[error("Validator for '{expected}' cannot validate '{file_path}' of kind '{found}'")]
    KindMismatch {
        expected: ContentKind,
        found: ContentKind,
        file_path: String,
    },

    /// No naming rule is registered for the kind
    #[error("No naming rule is registered for content kind '{kind}'")]
    MissingNamingRule { kind: ContentKind },

    /// The content kind could not be inferred from path or shape
    #[error("Could not infer the content kind of '{file_path}'")]
    UnknownKind { file_path: String },
}

impl ValidationError {
    /// Whether this error is a catalog/check mismatch
    pub fn is_unknown_code(&self) -> bool {
        matches!(
            self,
            Self::Catalog(CatalogError::UnknownCode { .. }) | Self::UndeclaredCode { .. }
        )
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_classification() {
        let err: ValidationError = CatalogError::UnknownCode {
            code: "XX1".to_string(),
        }
        .into();
        assert!(err.is_unknown_code());
        assert!(err.to_string().contains("XX1"));

        let err = ValidationError::UndeclaredCode {
            check: "no_leading_hyphen".to_string(),
            code: "CR101".to_string(),
        };
        assert!(err.is_unknown_code());

        let err = ValidationError::AlreadyRun {
            file_path: "a.yml".to_string(),
        };
        assert!(!err.is_unknown_code());
    }
}
