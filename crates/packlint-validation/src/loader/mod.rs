//! Structural loading of content documents
//!
//! This module reads YAML and JSON content items into a generic
//! `serde_json::Value` tree and reports the root shape of each document.
//! Validators never parse; they receive what the loader produced.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use packlint_validation::loader::DocumentParser;
//! use std::path::Path;
//!
//! let loaded = DocumentParser::new().load(Path::new("correlation_rule-example.yml"))?;
//! println!("{} is {}", loaded.path.display(), loaded.root_shape());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

pub mod discovery;
pub mod error;
pub mod parser;

pub use discovery::{discover_documents, is_candidate};
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format, LoadedDocument, RootShape};
