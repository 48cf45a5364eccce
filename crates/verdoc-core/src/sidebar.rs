//! Sidebar definitions and navigation order.
//!
//! A sidebar is a named, ordered, possibly-nested tree of categories and
//! document references, declared in YAML:
//!
//! ```yaml
//! docs:
//!   - intro
//!   - label: Guides
//!     items:
//!       - setup
//!       - config
//!   - faq
//! ```
//!
//! Flattening is a deterministic depth-first, left-to-right traversal:
//! category labels are not navigable and are skipped; document references
//! append to the flattened sequence in declaration order. Previous/next
//! neighbors are assigned in one pass over the flattened sequence.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use crate::error::LoadError;

/// One node of a sidebar tree: either a document reference or a category
/// grouping child nodes under a label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SidebarNode {
    /// Reference to a document by id.
    DocRef(String),
    /// Category with an ordered list of child nodes. The label itself is not
    /// navigable.
    Category {
        /// Display label.
        label: String,
        /// Child nodes in declaration order.
        #[serde(default)]
        items: Vec<SidebarNode>,
    },
}

/// All sidebars of one version, keyed by sidebar name.
///
/// A `BTreeMap` keeps iteration (and therefore error selection and
/// navigation assembly) deterministic.
pub type SidebarSet = BTreeMap<String, Vec<SidebarNode>>;

/// Parse a sidebar definition file.
///
/// An empty file declares an empty sidebar set.
///
/// # Errors
///
/// Returns the YAML error for malformed definitions; the caller attaches the
/// file path.
pub fn parse_sidebars(yaml: &str) -> Result<SidebarSet, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(SidebarSet::new());
    }
    serde_yaml::from_str(yaml)
}

/// Navigation order record for one document appearing in a sidebar.
///
/// Documents appearing in no sidebar have no entry at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderEntry {
    /// The document id.
    pub doc_id: String,
    /// Name of the owning sidebar.
    pub sidebar_name: String,
    /// Id of the preceding document in the flattened sequence.
    pub previous_id: Option<String>,
    /// Id of the following document in the flattened sequence.
    pub next_id: Option<String>,
}

/// Flatten a sidebar tree into the pre-order sequence of its doc references.
fn flatten<'a>(nodes: &'a [SidebarNode], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            SidebarNode::DocRef(id) => out.push(id),
            SidebarNode::Category { items, .. } => flatten(items, out),
        }
    }
}

/// Build the navigation order for every sidebar of a version.
///
/// Returns a map from document id to its [`OrderEntry`]. The relative order
/// of sibling nodes in the source tree is exactly the relative order in the
/// flattened sequence.
///
/// # Errors
///
/// - [`LoadError::DanglingSidebarRef`] when a referenced id is not in
///   `valid_ids`
/// - [`LoadError::DuplicateSidebarRef`] when an id appears twice in one
///   sidebar
/// - [`LoadError::ConflictingSidebars`] when an id appears in two sidebars
pub fn build_order(
    sidebars: &SidebarSet,
    valid_ids: &HashSet<String>,
    version_name: &str,
) -> Result<HashMap<String, OrderEntry>, LoadError> {
    let mut entries: HashMap<String, OrderEntry> = HashMap::new();

    for (sidebar_name, nodes) in sidebars {
        let mut flat = Vec::new();
        flatten(nodes, &mut flat);

        let mut seen: HashSet<&str> = HashSet::new();
        for &id in &flat {
            if !valid_ids.contains(id) {
                return Err(LoadError::DanglingSidebarRef {
                    version: version_name.to_owned(),
                    sidebar: sidebar_name.clone(),
                    id: id.to_owned(),
                });
            }
            if !seen.insert(id) {
                return Err(LoadError::DuplicateSidebarRef {
                    version: version_name.to_owned(),
                    sidebar: sidebar_name.clone(),
                    id: id.to_owned(),
                });
            }
            if let Some(existing) = entries.get(id) {
                return Err(LoadError::ConflictingSidebars {
                    version: version_name.to_owned(),
                    id: id.to_owned(),
                    first: existing.sidebar_name.clone(),
                    second: sidebar_name.clone(),
                });
            }
        }

        for (i, &id) in flat.iter().enumerate() {
            entries.insert(
                id.to_owned(),
                OrderEntry {
                    doc_id: id.to_owned(),
                    sidebar_name: sidebar_name.clone(),
                    previous_id: i.checked_sub(1).map(|p| flat[p].to_owned()),
                    next_id: flat.get(i + 1).map(|&n| (*n).to_owned()),
                },
            );
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn flat_ids(nodes: &[SidebarNode]) -> Vec<String> {
        let mut out = Vec::new();
        flatten(nodes, &mut out);
        out.into_iter().map(str::to_owned).collect()
    }

    #[test]
    fn test_parse_doc_refs_and_categories() {
        let yaml = "docs:\n  - intro\n  - label: Guides\n    items:\n      - setup\n";

        let sidebars = parse_sidebars(yaml).unwrap();

        assert_eq!(sidebars.len(), 1);
        let nodes = &sidebars["docs"];
        assert_eq!(nodes[0], SidebarNode::DocRef("intro".to_owned()));
        assert_eq!(
            nodes[1],
            SidebarNode::Category {
                label: "Guides".to_owned(),
                items: vec![SidebarNode::DocRef("setup".to_owned())],
            }
        );
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_sidebars("").unwrap().is_empty());
        assert!(parse_sidebars("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_is_error() {
        assert!(parse_sidebars("docs: [unclosed").is_err());
        assert!(parse_sidebars("- top level list").is_err());
    }

    #[test]
    fn test_parse_category_without_items() {
        let yaml = "docs:\n  - label: Placeholder\n";

        let sidebars = parse_sidebars(yaml).unwrap();

        assert_eq!(
            sidebars["docs"][0],
            SidebarNode::Category {
                label: "Placeholder".to_owned(),
                items: Vec::new(),
            }
        );
    }

    #[test]
    fn test_flatten_preserves_preorder() {
        let yaml = "docs:\n  - label: Guides\n    items:\n      - intro\n      - setup\n  - faq\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        assert_eq!(flat_ids(&sidebars["docs"]), vec!["intro", "setup", "faq"]);
    }

    #[test]
    fn test_flatten_nested_categories() {
        let yaml = concat!(
            "docs:\n",
            "  - a\n",
            "  - label: Outer\n",
            "    items:\n",
            "      - b\n",
            "      - label: Inner\n",
            "        items:\n",
            "          - c\n",
            "      - d\n",
            "  - e\n",
        );
        let sidebars = parse_sidebars(yaml).unwrap();

        assert_eq!(flat_ids(&sidebars["docs"]), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_empty_category_contributes_nothing() {
        let yaml = "docs:\n  - a\n  - label: Empty\n    items: []\n  - b\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        assert_eq!(flat_ids(&sidebars["docs"]), vec!["a", "b"]);

        let orders = build_order(&sidebars, &ids(&["a", "b"]), "current").unwrap();
        assert_eq!(orders["a"].next_id, Some("b".to_owned()));
    }

    #[test]
    fn test_build_order_assigns_neighbors() {
        let yaml = "docs:\n  - label: Guides\n    items:\n      - intro\n      - setup\n  - faq\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        let orders = build_order(&sidebars, &ids(&["intro", "setup", "faq"]), "current").unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders["intro"].previous_id, None);
        assert_eq!(orders["intro"].next_id, Some("setup".to_owned()));
        assert_eq!(orders["setup"].previous_id, Some("intro".to_owned()));
        assert_eq!(orders["setup"].next_id, Some("faq".to_owned()));
        assert_eq!(orders["faq"].previous_id, Some("setup".to_owned()));
        assert_eq!(orders["faq"].next_id, None);
        assert_eq!(orders["intro"].sidebar_name, "docs");
    }

    #[test]
    fn test_build_order_single_doc_has_no_neighbors() {
        let sidebars = parse_sidebars("docs:\n  - only\n").unwrap();

        let orders = build_order(&sidebars, &ids(&["only"]), "current").unwrap();

        assert_eq!(orders["only"].previous_id, None);
        assert_eq!(orders["only"].next_id, None);
    }

    #[test]
    fn test_build_order_neighbors_are_mutual() {
        let yaml = "docs:\n  - a\n  - b\n  - c\n  - d\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        let orders = build_order(&sidebars, &ids(&["a", "b", "c", "d"]), "current").unwrap();

        for entry in orders.values() {
            if let Some(next) = &entry.next_id {
                assert_eq!(orders[next].previous_id, Some(entry.doc_id.clone()));
            }
            if let Some(previous) = &entry.previous_id {
                assert_eq!(orders[previous].next_id, Some(entry.doc_id.clone()));
            }
        }
    }

    #[test]
    fn test_doc_in_no_sidebar_has_no_entry() {
        let sidebars = parse_sidebars("docs:\n  - a\n").unwrap();

        let orders = build_order(&sidebars, &ids(&["a", "unlisted"]), "current").unwrap();

        assert!(orders.contains_key("a"));
        assert!(!orders.contains_key("unlisted"));
    }

    #[test]
    fn test_dangling_reference_is_error() {
        let sidebars = parse_sidebars("docs:\n  - missing-doc\n").unwrap();

        let err = build_order(&sidebars, &ids(&["present"]), "current").unwrap_err();

        match err {
            LoadError::DanglingSidebarRef { sidebar, id, .. } => {
                assert_eq!(sidebar, "docs");
                assert_eq!(id, "missing-doc");
            }
            other => panic!("expected DanglingSidebarRef, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_within_sidebar_is_error() {
        let yaml = "docs:\n  - a\n  - label: Guides\n    items:\n      - a\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        let err = build_order(&sidebars, &ids(&["a"]), "current").unwrap_err();

        match err {
            LoadError::DuplicateSidebarRef { sidebar, id, .. } => {
                assert_eq!(sidebar, "docs");
                assert_eq!(id, "a");
            }
            other => panic!("expected DuplicateSidebarRef, got {other:?}"),
        }
    }

    #[test]
    fn test_doc_in_two_sidebars_is_error() {
        let yaml = "api:\n  - shared\nguides:\n  - shared\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        let err = build_order(&sidebars, &ids(&["shared"]), "current").unwrap_err();

        match err {
            LoadError::ConflictingSidebars { id, first, second, .. } => {
                assert_eq!(id, "shared");
                // BTreeMap iteration: "api" before "guides"
                assert_eq!(first, "api");
                assert_eq!(second, "guides");
            }
            other => panic!("expected ConflictingSidebars, got {other:?}"),
        }
    }

    #[test]
    fn test_two_sidebars_have_independent_sequences() {
        let yaml = "api:\n  - ref-a\n  - ref-b\nguides:\n  - intro\n  - setup\n";
        let sidebars = parse_sidebars(yaml).unwrap();

        let orders = build_order(
            &sidebars,
            &ids(&["ref-a", "ref-b", "intro", "setup"]),
            "current",
        )
        .unwrap();

        // Sequences do not bleed into each other
        assert_eq!(orders["ref-b"].next_id, None);
        assert_eq!(orders["intro"].previous_id, None);
        assert_eq!(orders["intro"].sidebar_name, "guides");
        assert_eq!(orders["ref-a"].sidebar_name, "api");
    }
}
