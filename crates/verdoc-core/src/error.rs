//! Resolution error types.
//!
//! Every error here is fatal: the load cycle is all-or-nothing, because the
//! navigation graph's uniqueness and ordering invariants cannot be satisfied
//! with partial data. Errors carry enough context (version name, source
//! paths, conflicting ids) for a human to fix the configuration.

use std::path::PathBuf;

use verdoc_storage::StorageError;

/// Fatal resolution error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Invalid or inconsistent configuration: missing documents directory,
    /// missing sidebar file, empty version set, unresolvable home document.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two documents resolved to the same id within one version.
    #[error(
        "Duplicate document id '{id}' in version '{version}': {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateId {
        /// Version containing the conflict.
        version: String,
        /// The conflicting id.
        id: String,
        /// Source path of the first document.
        first: PathBuf,
        /// Source path of the second document.
        second: PathBuf,
    },

    /// Two documents resolved to the same permalink within one version.
    #[error(
        "Duplicate permalink '{permalink}' in version '{version}': {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicatePermalink {
        /// Version containing the conflict.
        version: String,
        /// The conflicting permalink.
        permalink: String,
        /// Source path of the first document.
        first: PathBuf,
        /// Source path of the second document.
        second: PathBuf,
    },

    /// A document is referenced twice within the same sidebar.
    #[error("Duplicate reference to '{id}' in sidebar '{sidebar}' of version '{version}'")]
    DuplicateSidebarRef {
        /// Version containing the conflict.
        version: String,
        /// Sidebar containing both references.
        sidebar: String,
        /// The doubly-referenced document id.
        id: String,
    },

    /// A document is referenced from two different sidebars of one version.
    #[error("Document '{id}' appears in sidebars '{first}' and '{second}' of version '{version}'")]
    ConflictingSidebars {
        /// Version containing the conflict.
        version: String,
        /// The document id claimed by both sidebars.
        id: String,
        /// First claiming sidebar.
        first: String,
        /// Second claiming sidebar.
        second: String,
    },

    /// A sidebar references a document id that does not exist in the version.
    #[error("Sidebar '{sidebar}' in version '{version}' references unknown document '{id}'")]
    DanglingSidebarRef {
        /// Version containing the reference.
        version: String,
        /// Sidebar containing the reference.
        sidebar: String,
        /// The unresolvable document id.
        id: String,
    },

    /// A sidebar definition file could not be parsed.
    #[error("Malformed sidebar definition {}: {message}", .path.display())]
    MalformedSidebar {
        /// Path of the sidebar definition file.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The storage backend failed while loading a version's documents.
    #[error("Storage error in version '{version}': {source}")]
    Storage {
        /// Version being loaded.
        version: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}
