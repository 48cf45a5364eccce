//! Storage abstraction for the Verdoc documentation resolver.
//!
//! This crate provides a [`Storage`] trait for abstracting document scanning and content
//! retrieval from the underlying storage backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem today, object stores later)
//! - **Clean separation** between resolution logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`FsStorage`] implementation for filesystem backends
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! Scanning yields [`RawDocument`] records: the relative source path, the
//! parsed YAML frontmatter block, the raw title from the first H1 heading,
//! and a content hash. Unreadable files and malformed frontmatter are fatal
//! at this boundary.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use verdoc_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let documents = storage.scan()?;
//! for doc in documents {
//!     println!("{}", doc.source_path.display());
//! }
//! ```

mod frontmatter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use frontmatter::split_frontmatter;
pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Frontmatter, RawDocument, Storage, StorageError, StorageErrorKind};
