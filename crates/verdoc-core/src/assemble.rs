//! Per-version assembly.
//!
//! Joins base document metadata with sidebar order entries to produce the
//! exported per-version collection: navigation links resolved to the
//! neighbor's title and permalink, the version's main document, and the
//! permalink→sidebar lookup.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::metadata::DocBase;
use crate::sidebar::OrderEntry;
use crate::version::VersionDescriptor;

/// Navigation link to a neighboring document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Neighbor's title.
    pub title: String,
    /// Neighbor's permalink.
    pub permalink: String,
}

/// Fully resolved document metadata.
///
/// Navigation fields are absent (not null-filled) for documents that appear
/// in no sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    /// Stable id, unique within the version.
    pub id: String,
    /// Human title.
    pub title: String,
    /// Version-relative route path.
    pub slug: String,
    /// Final route path, unique within the version.
    pub permalink: String,
    /// Source path relative to the version's documents root. Pairs this
    /// record 1:1 with rendered content.
    pub source: PathBuf,
    /// Owning version name.
    pub version_name: String,
    /// Name of the sidebar this document appears in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_name: Option<String>,
    /// Preceding document in the sidebar sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    /// Following document in the sidebar sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

/// A fully loaded version: descriptor fields plus the resolved document
/// collection. Built once per load cycle and replaced wholesale on the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedVersion {
    /// Version name.
    pub name: String,
    /// True for the latest released version.
    pub is_last: bool,
    /// Route path fragment of this version.
    pub route_path_fragment: String,
    /// Id of the version's main (home) document.
    pub main_doc_id: String,
    /// Resolved documents, ordered by source path.
    pub docs: Vec<DocMetadata>,
    /// Permalink → sidebar name, only for documents that have a sidebar.
    pub permalink_to_sidebar: BTreeMap<String, String>,
}

impl LoadedVersion {
    /// Look up a document by id.
    #[must_use]
    pub fn doc(&self, id: &str) -> Option<&DocMetadata> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// The version's main (home) document.
    #[must_use]
    pub fn main_doc(&self) -> Option<&DocMetadata> {
        self.doc(&self.main_doc_id)
    }
}

/// Join base metadata with order entries into a [`LoadedVersion`].
///
/// Neighbors are resolved by index lookup into the document collection, so
/// the exported shape carries titles and permalinks rather than raw ids.
///
/// # Errors
///
/// Returns [`LoadError::Configuration`] when the version has no documents,
/// or when no main document can be determined and `strict_home` is set.
pub fn assemble_version(
    descriptor: &VersionDescriptor,
    docs: Vec<DocBase>,
    orders: &HashMap<String, OrderEntry>,
    home_id: Option<&str>,
    strict_home: bool,
) -> Result<LoadedVersion, LoadError> {
    if docs.is_empty() {
        return Err(LoadError::Configuration(format!(
            "version '{}' contains no documents under {}",
            descriptor.name,
            descriptor.docs_root_path.display()
        )));
    }

    let index: HashMap<&str, usize> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| (doc.id.as_str(), i))
        .collect();

    let nav_link = |id: &str| {
        index.get(id).map(|&i| NavLink {
            title: docs[i].title.clone(),
            permalink: docs[i].permalink.clone(),
        })
    };

    let main_doc_id = resolve_main_doc(descriptor, &docs, home_id, strict_home)?;

    let mut permalink_to_sidebar = BTreeMap::new();
    let mut resolved = Vec::with_capacity(docs.len());

    for doc in &docs {
        let entry = orders.get(&doc.id);
        if let Some(entry) = entry {
            permalink_to_sidebar.insert(doc.permalink.clone(), entry.sidebar_name.clone());
        }

        resolved.push(DocMetadata {
            id: doc.id.clone(),
            title: doc.title.clone(),
            slug: doc.slug.clone(),
            permalink: doc.permalink.clone(),
            source: doc.source.clone(),
            version_name: doc.version_name.clone(),
            sidebar_name: entry.map(|e| e.sidebar_name.clone()),
            previous: entry
                .and_then(|e| e.previous_id.as_deref())
                .and_then(|id| nav_link(id)),
            next: entry
                .and_then(|e| e.next_id.as_deref())
                .and_then(|id| nav_link(id)),
        });
    }

    Ok(LoadedVersion {
        name: descriptor.name.clone(),
        is_last: descriptor.is_last,
        route_path_fragment: descriptor.route_path_fragment.clone(),
        main_doc_id,
        docs: resolved,
        permalink_to_sidebar,
    })
}

/// Determine the version's main document id.
///
/// Resolution: the document whose slug is exactly `/`, else the document
/// matching the configured home id, else the first document after a stable
/// sort by id. The last step is a guessing heuristic; under `strict_home` it
/// is an error instead.
fn resolve_main_doc(
    descriptor: &VersionDescriptor,
    docs: &[DocBase],
    home_id: Option<&str>,
    strict_home: bool,
) -> Result<String, LoadError> {
    if let Some(doc) = docs.iter().find(|d| d.slug == "/") {
        return Ok(doc.id.clone());
    }

    if let Some(home) = home_id {
        if docs.iter().any(|d| d.id == home) {
            return Ok(home.to_owned());
        }
        tracing::debug!(
            version = %descriptor.name,
            home_id = home,
            "configured home document not present in this version"
        );
    }

    if strict_home {
        return Err(LoadError::Configuration(format!(
            "cannot determine home document for version '{}': no document has slug '/' and no home_id matched",
            descriptor.name
        )));
    }

    let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    ids.sort_unstable();
    let main = ids[0].to_owned();
    tracing::warn!(
        version = %descriptor.name,
        main_doc = %main,
        "no home document configured; falling back to first document by id"
    );
    Ok(main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::{build_order, parse_sidebars};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn descriptor() -> VersionDescriptor {
        VersionDescriptor {
            name: "current".to_owned(),
            is_last: true,
            route_path_fragment: String::new(),
            docs_root_path: PathBuf::from("/site/docs"),
            sidebar_definition_path: PathBuf::from("/site/sidebars.yaml"),
        }
    }

    fn doc(id: &str, slug: &str) -> DocBase {
        DocBase {
            id: id.to_owned(),
            title: id.to_uppercase(),
            slug: slug.to_owned(),
            permalink: format!("/docs{}", if slug == "/" { "" } else { slug }),
            source: PathBuf::from(format!("{id}.md")),
            version_name: "current".to_owned(),
        }
    }

    fn orders_for(yaml: &str, docs: &[DocBase]) -> HashMap<String, OrderEntry> {
        let sidebars = parse_sidebars(yaml).unwrap();
        let valid: HashSet<String> = docs.iter().map(|d| d.id.clone()).collect();
        build_order(&sidebars, &valid, "current").unwrap()
    }

    #[test]
    fn test_navigation_links_resolve_neighbor_metadata() {
        let docs = vec![doc("faq", "/faq"), doc("intro", "/"), doc("setup", "/setup")];
        let orders = orders_for(
            "docs:\n  - label: Guides\n    items:\n      - intro\n      - setup\n  - faq\n",
            &docs,
        );

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();

        let intro = version.doc("intro").unwrap();
        assert!(intro.previous.is_none());
        assert_eq!(
            intro.next,
            Some(NavLink {
                title: "SETUP".to_owned(),
                permalink: "/docs/setup".to_owned(),
            })
        );

        let setup = version.doc("setup").unwrap();
        assert_eq!(setup.previous.as_ref().unwrap().title, "INTRO");
        assert_eq!(setup.next.as_ref().unwrap().permalink, "/docs/faq");

        let faq = version.doc("faq").unwrap();
        assert_eq!(faq.previous.as_ref().unwrap().title, "SETUP");
        assert!(faq.next.is_none());
    }

    #[test]
    fn test_doc_outside_sidebars_has_no_navigation() {
        let docs = vec![doc("intro", "/"), doc("orphan", "/orphan")];
        let orders = orders_for("docs:\n  - intro\n", &docs);

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();

        let orphan = version.doc("orphan").unwrap();
        assert!(orphan.sidebar_name.is_none());
        assert!(orphan.previous.is_none());
        assert!(orphan.next.is_none());
        // Still part of the collection
        assert_eq!(version.docs.len(), 2);
    }

    #[test]
    fn test_main_doc_by_root_slug() {
        let docs = vec![doc("alpha", "/alpha"), doc("welcome", "/")];
        let orders = HashMap::new();

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();

        assert_eq!(version.main_doc_id, "welcome");
        assert_eq!(version.main_doc().unwrap().slug, "/");
    }

    #[test]
    fn test_main_doc_by_home_id() {
        let docs = vec![doc("alpha", "/alpha"), doc("intro", "/intro")];
        let orders = HashMap::new();

        let version =
            assemble_version(&descriptor(), docs, &orders, Some("intro"), false).unwrap();

        assert_eq!(version.main_doc_id, "intro");
    }

    #[test]
    fn test_main_doc_root_slug_wins_over_home_id() {
        let docs = vec![doc("home", "/"), doc("intro", "/intro")];
        let orders = HashMap::new();

        let version =
            assemble_version(&descriptor(), docs, &orders, Some("intro"), false).unwrap();

        assert_eq!(version.main_doc_id, "home");
    }

    // The fallback picks an arbitrary (first-by-id) document; it is a
    // documented guessing heuristic, not a deliberate policy.
    #[test]
    fn test_main_doc_fallback_heuristic_first_by_id() {
        let docs = vec![doc("zeta", "/zeta"), doc("beta", "/beta")];
        let orders = HashMap::new();

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();

        assert_eq!(version.main_doc_id, "beta");
    }

    #[test]
    fn test_main_doc_missing_home_id_falls_through() {
        let docs = vec![doc("beta", "/beta")];
        let orders = HashMap::new();

        let version =
            assemble_version(&descriptor(), docs, &orders, Some("absent"), false).unwrap();

        assert_eq!(version.main_doc_id, "beta");
    }

    #[test]
    fn test_strict_home_rejects_fallback() {
        let docs = vec![doc("beta", "/beta")];
        let orders = HashMap::new();

        let err = assemble_version(&descriptor(), docs, &orders, None, true).unwrap_err();

        match err {
            LoadError::Configuration(msg) => {
                assert!(msg.contains("home document"));
                assert!(msg.contains("current"));
            }
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_home_accepts_explicit_home() {
        let docs = vec![doc("beta", "/beta"), doc("intro", "/intro")];
        let orders = HashMap::new();

        let version = assemble_version(&descriptor(), docs, &orders, Some("intro"), true).unwrap();

        assert_eq!(version.main_doc_id, "intro");
    }

    #[test]
    fn test_empty_version_is_error() {
        let err = assemble_version(&descriptor(), Vec::new(), &HashMap::new(), None, false)
            .unwrap_err();

        match err {
            LoadError::Configuration(msg) => assert!(msg.contains("no documents")),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_permalink_to_sidebar_only_for_sidebar_docs() {
        let docs = vec![doc("intro", "/"), doc("orphan", "/orphan")];
        let orders = orders_for("docs:\n  - intro\n", &docs);

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();

        assert_eq!(version.permalink_to_sidebar.len(), 1);
        assert_eq!(
            version.permalink_to_sidebar.get("/docs"),
            Some(&"docs".to_owned())
        );
    }

    #[test]
    fn test_serialization_skips_absent_navigation() {
        let docs = vec![doc("intro", "/")];
        let orders = HashMap::new();

        let version = assemble_version(&descriptor(), docs, &orders, None, false).unwrap();
        let json = serde_json::to_value(&version.docs[0]).unwrap();

        assert_eq!(json["id"], "intro");
        assert!(json.get("sidebar_name").is_none());
        assert!(json.get("previous").is_none());
        assert!(json.get("next").is_none());
    }

    #[test]
    fn test_descriptor_fields_carried_over() {
        let descriptor = VersionDescriptor {
            name: "1.0".to_owned(),
            is_last: false,
            route_path_fragment: "1.0".to_owned(),
            docs_root_path: PathBuf::from("/site/versioned_docs/version-1.0"),
            sidebar_definition_path: PathBuf::from("/site/versioned_sidebars/version-1.0.yaml"),
        };
        let docs = vec![doc("intro", "/")];

        let version = assemble_version(&descriptor, docs, &HashMap::new(), None, false).unwrap();

        assert_eq!(version.name, "1.0");
        assert!(!version.is_last);
        assert_eq!(version.route_path_fragment, "1.0");
    }
}
