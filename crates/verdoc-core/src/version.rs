//! Version discovery and ordering.
//!
//! Turns the configured version set into an ordered list of
//! [`VersionDescriptor`]s. The first declared name is the "latest" released
//! version and is served at the unversioned route; the unreleased "current"
//! version is served under `next`; every other historical version is served
//! under its own name.

use std::path::PathBuf;

use serde::Serialize;
use verdoc_config::Config;

use crate::error::LoadError;

/// Name of the unreleased version built from the working docs directory.
pub const CURRENT_VERSION_NAME: &str = "current";

/// Route fragment under which the unreleased version is served.
pub const CURRENT_ROUTE_FRAGMENT: &str = "next";

/// A resolved version of the documentation set.
///
/// Created once at resolution start from configuration and filesystem
/// layout; immutable afterward. Exactly one descriptor in a resolved set has
/// `is_last = true`, and names are unique across the set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    /// Version name ("current" for the unreleased version).
    pub name: String,
    /// True for the latest released version (or the current version when no
    /// versions are declared).
    pub is_last: bool,
    /// Route path fragment: empty for the latest version, `next` for the
    /// current version, the version name otherwise.
    pub route_path_fragment: String,
    /// Root directory of this version's documents.
    pub docs_root_path: PathBuf,
    /// Path of this version's sidebar definition file.
    pub sidebar_definition_path: PathBuf,
}

/// Resolve the ordered version set from configuration.
///
/// Order: the current version first (when included and not itself the
/// latest), then the declared names in declared order (most recent first).
///
/// # Errors
///
/// Returns [`LoadError::Configuration`] if the configuration yields an empty
/// version set.
pub fn resolve_versions(config: &Config) -> Result<Vec<VersionDescriptor>, LoadError> {
    let docs = &config.docs_resolved;

    let mut names: &[String] = &config.versions.names;
    if !config.versions.include_historical && !names.is_empty() {
        names = &names[..1];
    }

    if names.is_empty() && !config.versions.include_current {
        return Err(LoadError::Configuration(
            "no versions to resolve: versions.names is empty and include_current is false"
                .to_owned(),
        ));
    }

    let mut descriptors = Vec::with_capacity(names.len() + 1);

    if config.versions.include_current {
        // With no declared versions the current version is the released one.
        let is_last = names.is_empty();
        descriptors.push(VersionDescriptor {
            name: CURRENT_VERSION_NAME.to_owned(),
            is_last,
            route_path_fragment: if is_last {
                String::new()
            } else {
                CURRENT_ROUTE_FRAGMENT.to_owned()
            },
            docs_root_path: docs.source_dir.clone(),
            sidebar_definition_path: docs.sidebars_file.clone(),
        });
    }

    for (i, name) in names.iter().enumerate() {
        let is_last = i == 0;
        descriptors.push(VersionDescriptor {
            name: name.clone(),
            is_last,
            route_path_fragment: if is_last { String::new() } else { name.clone() },
            docs_root_path: docs.versioned_dir.join(format!("version-{name}")),
            sidebar_definition_path: docs
                .versioned_sidebars_dir
                .join(format!("version-{name}.yaml")),
        });
    }

    Ok(descriptors)
}
