//! Mock storage for testing.
//!
//! Provides [`MockStorage`] so consumers can exercise resolution logic
//! without touching the filesystem. Enabled with the `mock` feature.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::frontmatter::split_frontmatter;
use crate::storage::{RawDocument, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory storage backed by a map of path to file content.
///
/// Content is parsed the same way [`FsStorage`](crate::FsStorage) parses
/// real files: frontmatter split, H1 extraction, content hashing.
#[derive(Debug, Default)]
pub struct MockStorage {
    files: HashMap<PathBuf, String>,
}

impl MockStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given relative path and content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<RawDocument>, StorageError> {
        let mut paths: Vec<_> = self.files.keys().collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = &self.files[path];
            let (frontmatter, body) = split_frontmatter(content)
                .map_err(|e| StorageError::malformed(path.clone(), e).with_backend(BACKEND))?;

            let raw_title = body.lines().find_map(|line| {
                line.strip_prefix("# ").map(|rest| rest.trim().to_owned())
            });

            documents.push(RawDocument {
                source_path: path.clone(),
                frontmatter,
                raw_title,
                content_hash: hex::encode(Sha256::digest(content.as_bytes())),
            });
        }

        Ok(documents)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files.get(path).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
