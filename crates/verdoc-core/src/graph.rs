//! Global graph assembly.
//!
//! Runs the per-version pipelines (scan → metadata → sidebar order →
//! assemble) and merges their results into the exported [`GlobalGraph`].
//!
//! # Concurrency
//!
//! Versions have no cross-version data dependency, so their pipelines run in
//! parallel on the rayon thread pool. Each pipeline owns its intermediate
//! structures; the graph is constructed only after all pipelines complete.
//! A fatal error in any version aborts the whole load cycle: a partially
//! resolved navigation graph would expose dangling links. Re-running on
//! unchanged input produces a structurally identical graph.

use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use verdoc_config::Config;
use verdoc_storage::{FsStorage, Storage, StorageErrorKind};

use crate::assemble::{LoadedVersion, assemble_version};
use crate::error::LoadError;
use crate::metadata::resolve_docs;
use crate::sidebar::{SidebarSet, build_order, parse_sidebars};
use crate::version::{VersionDescriptor, resolve_versions};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// The terminal artifact of a load cycle: all versions plus the latest
/// version's name. Serializable into a registry for a renderer/router.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalGraph {
    /// Loaded versions: current first (when included and unreleased), then
    /// declared order.
    pub versions: Vec<LoadedVersion>,
    /// Name of the version with `is_last = true`.
    pub latest_version_name: String,
}

impl GlobalGraph {
    /// The latest released version.
    #[must_use]
    pub fn latest(&self) -> Option<&LoadedVersion> {
        self.versions.iter().find(|v| v.is_last)
    }

    /// Look up a version by name.
    #[must_use]
    pub fn version(&self, name: &str) -> Option<&LoadedVersion> {
        self.versions.iter().find(|v| v.name == name)
    }

    /// Total number of documents across all versions.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.versions.iter().map(|v| v.docs.len()).sum()
    }
}

/// Borrowed site-level options for one resolution cycle.
#[derive(Clone, Copy, Debug)]
pub struct ResolveOptions<'a> {
    /// Site base URL.
    pub base_url: &'a str,
    /// Route base path between base URL and version fragment.
    pub route_base_path: &'a str,
    /// Explicit home document id.
    pub home_id: Option<&'a str>,
    /// Fail instead of guessing when no home document can be determined.
    pub strict_home: bool,
}

impl<'a> ResolveOptions<'a> {
    /// Borrow the options from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            base_url: &config.site.base_url,
            route_base_path: &config.site.route_base_path,
            home_id: config.docs_resolved.home_id.as_deref(),
            strict_home: config.docs_resolved.strict_home,
        }
    }
}

/// Run one version's pipeline: scan, resolve metadata, build sidebar order,
/// assemble.
///
/// # Errors
///
/// Returns the first fatal [`LoadError`] encountered. A missing documents
/// directory is reported as a configuration error naming the path and
/// version.
pub fn load_version(
    descriptor: &VersionDescriptor,
    storage: &dyn Storage,
    sidebars: &SidebarSet,
    options: &ResolveOptions<'_>,
) -> Result<LoadedVersion, LoadError> {
    let raws = storage.scan().map_err(|e| match e.kind {
        StorageErrorKind::NotFound => LoadError::Configuration(format!(
            "documents directory {} for version '{}' does not exist",
            descriptor.docs_root_path.display(),
            descriptor.name
        )),
        _ => LoadError::Storage {
            version: descriptor.name.clone(),
            source: e,
        },
    })?;

    let docs = resolve_docs(descriptor, raws, options.base_url, options.route_base_path)?;

    let valid_ids: HashSet<String> = docs.iter().map(|d| d.id.clone()).collect();
    let orders = build_order(sidebars, &valid_ids, &descriptor.name)?;

    assemble_version(descriptor, docs, &orders, options.home_id, options.strict_home)
}

/// Read and parse a version's sidebar definition file.
fn read_sidebars(descriptor: &VersionDescriptor) -> Result<SidebarSet, LoadError> {
    let path = &descriptor.sidebar_definition_path;
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::Configuration(format!(
            "sidebar definition {} for version '{}' does not exist",
            path.display(),
            descriptor.name
        )),
        _ => LoadError::Configuration(format!(
            "cannot read sidebar definition {}: {e}",
            path.display()
        )),
    })?;

    parse_sidebars(&content).map_err(|e| LoadError::MalformedSidebar {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Resolve the whole site into a [`GlobalGraph`].
///
/// Per-version pipelines run in parallel; the first error aborts the cycle.
///
/// # Errors
///
/// Returns the first fatal [`LoadError`] from version resolution or any
/// version pipeline.
pub fn resolve_site(config: &Config) -> Result<GlobalGraph, LoadError> {
    let start = Instant::now();

    let descriptors = resolve_versions(config)?;
    let options = ResolveOptions::from_config(config);

    let versions = descriptors
        .par_iter()
        .map(|descriptor| {
            let storage = FsStorage::with_include(
                descriptor.docs_root_path.clone(),
                &config.docs_resolved.include,
            );
            let sidebars = read_sidebars(descriptor)?;
            load_version(descriptor, &storage, &sidebars, &options)
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let latest_version_name = versions
        .iter()
        .find(|v| v.is_last)
        .map(|v| v.name.clone())
        .ok_or_else(|| LoadError::Configuration("no latest version resolved".to_owned()))?;

    tracing::info!(
        version_count = versions.len(),
        doc_count = versions.iter().map(|v| v.docs.len()).sum::<usize>(),
        elapsed_ms = elapsed_ms(start),
        "Site resolved"
    );

    Ok(GlobalGraph {
        versions,
        latest_version_name,
    })
}
