//! Packlint Validation - content-item checks backed by an error catalog
//!
//! This crate validates rule-like content documents (correlation, parsing and
//! modeling rules) found in a content repository:
//!
//! - **Error Catalog**: stable codes with message templates and categories
//! - **Check Runner**: ordered checks, one diagnostic funnel, monotonic validity
//! - **Ignore-lists and warning-mode**: per-file or global suppression
//! - **Naming Rules**: pluggable file naming conventions per content kind
//! - **Loader**: YAML/JSON documents and repository discovery
//! - **Batch Processing**: many files with `fail_fast` and `max_errors`
//!
//! ## Quick Start
//!
//! ```rust
//! use packlint_validation::{
//!     ContentEntity, ContentKind, ContentValidator, CorrelationRuleValidator, ErrorCatalog,
//!     ValidationContext,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let entity = ContentEntity::new(
//!     json!({"global_rule_id": "x", "name": "y"}),
//!     "correlation_rule-good.json",
//!     ContentKind::CorrelationRule,
//! );
//! let context = ValidationContext::new(entity.file_path());
//! let mut validator =
//!     CorrelationRuleValidator::new(&entity, context, Arc::new(ErrorCatalog::builtin())).unwrap();
//!
//! assert!(validator.is_valid_file(true, false, false).unwrap());
//! assert!(validator.outcome().diagnostics.is_empty());
//! ```
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod loader;
pub mod validation;

// Re-export commonly used types for convenience
pub use catalog::{format_list, CatalogError, Category, ErrorCatalog, ErrorCode};
pub use loader::{discover_documents, DocumentParser, LoadedDocument, LoaderError, LoaderResult, RootShape};
pub use validation::{
    validate_entities, validate_entity, validate_entity_with, validator_for, BatchReport, Check, CheckTable,
    ContentEntity, ContentEntityValidator, ContentKind, ContentValidator, CorrelationRuleValidator, Diagnostic,
    Disposition, IgnoreList, ModelingRuleValidator, NamingRegistry, NamingRule, ParsingRuleValidator, RunState,
    ValidationConfig, ValidationContext, ValidationError, ValidationOutcome, ValidationResult,
};
