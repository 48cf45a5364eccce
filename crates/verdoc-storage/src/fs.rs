//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from the local filesystem.
//! Scanning is recursive, deterministic, and all-or-nothing: the first
//! unreadable file or malformed frontmatter block aborts the scan.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::frontmatter::split_frontmatter;
use crate::storage::{RawDocument, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for files matching the include
/// patterns, parses their frontmatter, extracts the first H1 heading, and
/// hashes their content.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use verdoc_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let docs = storage.scan()?;
/// ```
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// Regex for extracting first H1 heading.
    h1_regex: Regex,
    /// Patterns selecting which files count as documents (e.g., "**/*.md").
    include: Vec<Pattern>,
}

impl FsStorage {
    /// Create a new filesystem storage with default include patterns.
    ///
    /// Uses `**/*.md` as the default include pattern.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing markdown files
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_include(source_dir, &["**/*.md".to_owned()])
    }

    /// Create a new filesystem storage with custom include patterns.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing markdown files
    /// * `patterns` - Glob patterns for file selection (e.g., `["**/*.md", "**/*.mdx"]`)
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - The internal regex for H1 heading extraction fails to compile
    /// - Any of the provided glob patterns are invalid
    #[must_use]
    pub fn with_include(source_dir: PathBuf, patterns: &[String]) -> Self {
        let include = patterns
            .iter()
            .map(|p| Pattern::new(p).expect("invalid glob pattern"))
            .collect();

        Self {
            source_dir,
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
            include,
        }
    }

    /// Validate that a path doesn't escape the source directory.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal (e.g., `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let has_parent_dir = path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Scan directory recursively and collect documents.
    fn scan_directory(
        &self,
        dir_path: &Path,
        base_path: &Path,
    ) -> Result<Vec<RawDocument>, StorageError> {
        let entries = fs::read_dir(dir_path)
            .map_err(|e| StorageError::io(e, Some(dir_path.to_path_buf())).with_backend(BACKEND))?;

        let mut documents = Vec::new();

        // Collect entries with cached file_type to avoid repeated stat calls in sort.
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name_lower = e.file_name().to_string_lossy().to_lowercase();
                (e, is_dir, name_lower)
            })
            .collect();

        // Sort: directories first, then alphabetical by name
        entries.sort_by(|(_, a_is_dir, a_name), (_, b_is_dir, b_name)| {
            b_is_dir.cmp(a_is_dir).then_with(|| a_name.cmp(b_name))
        });

        for (entry, is_dir, name_lower) in entries {
            // Skip hidden and underscore-prefixed files/dirs
            if name_lower.starts_with('.') || name_lower.starts_with('_') {
                continue;
            }

            // Skip common non-documentation directories
            if is_dir
                && matches!(
                    name_lower.as_str(),
                    "node_modules"
                        | "target"
                        | "dist"
                        | "build"
                        | ".cache"
                        | "vendor"
                        | "__pycache__"
                )
            {
                continue;
            }

            let path = entry.path();
            let rel_path = base_path.join(entry.file_name());

            if is_dir {
                documents.extend(self.scan_directory(&path, &rel_path)?);
            } else if self.include.iter().any(|p| p.matches_path(&rel_path)) {
                documents.push(self.read_document(&path, rel_path)?);
            }
        }

        Ok(documents)
    }

    /// Read a single document: content, frontmatter, raw title, content hash.
    fn read_document(
        &self,
        file_path: &Path,
        rel_path: PathBuf,
    ) -> Result<RawDocument, StorageError> {
        let content = fs::read_to_string(file_path)
            .map_err(|e| StorageError::io(e, Some(rel_path.clone())).with_backend(BACKEND))?;

        let (frontmatter, body) = split_frontmatter(&content)
            .map_err(|e| StorageError::malformed(rel_path.clone(), e).with_backend(BACKEND))?;

        let raw_title = self
            .h1_regex
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_owned());

        let content_hash = hex::encode(Sha256::digest(content.as_bytes()));

        Ok(RawDocument {
            source_path: rel_path,
            frontmatter,
            raw_title,
            content_hash,
        })
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<RawDocument>, StorageError> {
        if !self.source_dir.exists() {
            return Err(StorageError::not_found(&self.source_dir).with_backend(BACKEND));
        }

        self.scan_directory(&self.source_dir, Path::new(""))
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.source_dir.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        Self::validate_path(path).is_ok() && self.source_dir.join(path).exists()
    }
}
