//! Locating content documents on disk
//!
//! Copyright (c) 2025 Packlint Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::Format;
use crate::validation::entity::ContentKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Whether a file is a candidate for validation.
///
/// Supported extensions always qualify. Other files qualify when they sit in
/// a content-kind folder, so a misnamed rule still gets reported.
pub fn is_candidate(path: &Path) -> bool {
    if Format::is_supported(path) {
        return true;
    }

    path.parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str())
        .map(|name| ContentKind::from_folder(name).is_some())
        .unwrap_or(false)
}

/// Collect candidate documents under `root`, sorted by path.
///
/// A file path is returned as-is. Hidden files and directories are skipped.
pub fn discover_documents(root: &Path) -> LoaderResult<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    if !root.exists() {
        return Err(LoaderError::io_error(
            root.to_path_buf(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
        ));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                if e.depth() == 0 {
                    return Err(LoaderError::walk_error(path, e.to_string()));
                }
                warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_file() && is_candidate(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    debug!(root = %root.display(), count = documents.len(), "Discovered documents");
    Ok(documents)
}
