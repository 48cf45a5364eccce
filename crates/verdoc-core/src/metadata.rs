//! Per-document metadata resolution.
//!
//! Derives each document's stable id, title, slug, and version-scoped
//! permalink from its raw record. Frontmatter overrides win over derivation;
//! derivation is purely a function of the relative source path, so results
//! are stable across versions that carry the same file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use verdoc_storage::RawDocument;

use crate::error::LoadError;
use crate::version::VersionDescriptor;

/// Base document metadata, before navigation is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocBase {
    /// Stable id, unique within a version (e.g. `advanced/setup`).
    pub id: String,
    /// Human title.
    pub title: String,
    /// Version-relative route path, always starting with `/`.
    pub slug: String,
    /// Final route path, scoped by the version's route fragment.
    pub permalink: String,
    /// Source path relative to the version's documents root.
    pub source: PathBuf,
    /// Owning version name.
    pub version_name: String,
}

/// Resolve base metadata for every document of a version.
///
/// Documents are returned sorted by source path, so the collection order is
/// independent of the storage backend's scan order.
///
/// # Errors
///
/// Returns [`LoadError::DuplicateId`] or [`LoadError::DuplicatePermalink`]
/// when two documents collide, naming both source paths.
pub fn resolve_docs(
    version: &VersionDescriptor,
    mut raws: Vec<RawDocument>,
    base_url: &str,
    route_base_path: &str,
) -> Result<Vec<DocBase>, LoadError> {
    raws.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    let mut by_id: HashMap<String, PathBuf> = HashMap::new();
    let mut by_permalink: HashMap<String, PathBuf> = HashMap::new();
    let mut docs = Vec::with_capacity(raws.len());

    for raw in raws {
        let id = raw
            .frontmatter
            .id
            .clone()
            .unwrap_or_else(|| derive_id(&raw.source_path));

        let title = raw
            .frontmatter
            .title
            .clone()
            .or_else(|| raw.raw_title.clone())
            .unwrap_or_else(|| title_from_filename(&raw.source_path));

        let slug = raw
            .frontmatter
            .slug
            .as_deref()
            .map_or_else(|| derive_slug(&raw.source_path), normalize_slug);

        let permalink = join_url(&[
            base_url,
            route_base_path,
            &version.route_path_fragment,
            &slug,
        ]);

        if let Some(first) = by_id.insert(id.clone(), raw.source_path.clone()) {
            return Err(LoadError::DuplicateId {
                version: version.name.clone(),
                id,
                first,
                second: raw.source_path,
            });
        }
        if let Some(first) = by_permalink.insert(permalink.clone(), raw.source_path.clone()) {
            return Err(LoadError::DuplicatePermalink {
                version: version.name.clone(),
                permalink,
                first,
                second: raw.source_path,
            });
        }

        docs.push(DocBase {
            id,
            title,
            slug,
            permalink,
            source: raw.source_path,
            version_name: version.name.clone(),
        });
    }

    Ok(docs)
}

/// Derive a document id from its relative source path.
///
/// Lower-cased, separator-normalized, extension stripped:
/// `Advanced/Setup.md` → `advanced/setup`.
fn derive_id(source_path: &Path) -> String {
    let normalized = normalize_path(source_path);
    normalized
        .rsplit_once('.')
        .map_or(normalized.as_str(), |(stem, _)| stem)
        .to_lowercase()
}

/// Derive a version-relative slug from a source path.
///
/// `index.md` → `/`, `guide.md` → `/guide`, `domain/index.md` → `/domain`,
/// `domain/setup.md` → `/domain/setup`.
fn derive_slug(source_path: &Path) -> String {
    let normalized = normalize_path(source_path);
    let without_ext = normalized
        .rsplit_once('.')
        .map_or(normalized.as_str(), |(stem, _)| stem);

    if without_ext == "index" {
        return "/".to_owned();
    }
    if let Some(without_index) = without_ext.strip_suffix("/index") {
        return format!("/{without_index}");
    }
    format!("/{without_ext}")
}

/// Normalize a frontmatter slug: leading slash, no trailing slash, no
/// duplicate separators. `guide/` → `/guide`; `/` stays `/`.
fn normalize_slug(slug: &str) -> String {
    let mut out = String::new();
    for seg in slug.trim().split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Join URL parts with single separators, collapsing empty segments.
fn join_url(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts {
        for seg in part.split('/').filter(|s| !s.is_empty()) {
            out.push('/');
            out.push_str(seg);
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Path with separators normalized to `/`.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Generate a human title from the source filename.
fn title_from_filename(source_path: &Path) -> String {
    let name = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
