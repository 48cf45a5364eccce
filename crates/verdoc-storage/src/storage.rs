//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting document scanning and retrieval,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! All path parameters are **relative source paths** (e.g. `guide.md`,
//! `advanced/setup.md`) resolved against the backend's document root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Parsed YAML frontmatter block of a markdown document.
///
/// All fields are optional. When a field is `None`, the document did not set
/// it and the resolver derives a value from the source path or content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Stable document id (overrides path derivation).
    #[serde(default)]
    pub id: Option<String>,
    /// Document title (overrides H1 extraction).
    #[serde(default)]
    pub title: Option<String>,
    /// Version-relative route path (overrides path derivation).
    #[serde(default)]
    pub slug: Option<String>,
}

impl Frontmatter {
    /// Check if the frontmatter has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.title.is_none() && self.slug.is_none()
    }
}

/// Raw document record returned by storage scan.
///
/// Owned by the storage layer; the resolver derives metadata from it without
/// mutating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    /// Source path relative to the documents root (e.g. `advanced/setup.md`).
    pub source_path: PathBuf,
    /// Parsed frontmatter block (default instance if the file has none).
    pub frontmatter: Frontmatter,
    /// Title from the first H1 heading of the body, if any.
    pub raw_title: Option<String>,
    /// Hex-encoded SHA-256 hash of the full file content.
    pub content_hash: String,
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Unparseable document content (e.g. malformed frontmatter).
    Malformed,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a malformed-content error with path.
    #[must_use]
    pub fn malformed(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(StorageErrorKind::Malformed)
            .with_path(path)
            .with_source(source)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Malformed => "Malformed content",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for document scanning and retrieval.
///
/// Provides a unified interface for accessing documents regardless of backend.
/// Implementations handle backend-specific details like file selection and
/// frontmatter parsing.
pub trait Storage: Send + Sync {
    /// Scan and return all documents under the root, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the root does not exist, a file cannot be
    /// read, or a frontmatter block is malformed. Scanning is all-or-nothing:
    /// the first failure aborts the scan.
    fn scan(&self) -> Result<Vec<RawDocument>, StorageError>;

    /// Read full content of a document.
    ///
    /// # Arguments
    ///
    /// * `path` - Source path relative to the documents root
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Check if a document exists at the given relative path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_default_is_empty() {
        assert!(Frontmatter::default().is_empty());
    }

    #[test]
    fn test_frontmatter_with_id_is_not_empty() {
        let fm = Frontmatter {
            id: Some("intro".to_owned()),
            ..Default::default()
        };
        assert!(!fm.is_empty());
    }

    #[test]
    fn test_error_display_includes_backend_and_path() {
        let err = StorageError::not_found("docs/missing.md").with_backend("Fs");
        let msg = err.to_string();
        assert!(msg.contains("[Fs]"));
        assert!(msg.contains("Not found"));
        assert!(msg.contains("docs/missing.md"));
    }

    #[test]
    fn test_error_from_io_maps_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StorageError::io(io, Some(PathBuf::from("a.md")));
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path, Some(PathBuf::from("a.md")));
    }

    #[test]
    fn test_error_from_io_maps_permission_denied() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = StorageError::io(io, None);
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert!(err.path.is_none());
    }

    #[test]
    fn test_malformed_error_keeps_source() {
        let yaml_err = serde_yaml::from_str::<Frontmatter>(": not yaml").unwrap_err();
        let err = StorageError::malformed("bad.md", yaml_err);
        assert_eq!(err.kind, StorageErrorKind::Malformed);
        assert!(std::error::Error::source(&err).is_some());
    }
}
