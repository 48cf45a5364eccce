//! Version and navigation resolution engine for Verdoc.
//!
//! This crate turns versioned documentation sources into an ordered,
//! navigable document graph:
//!
//! - version discovery and ordering ([`resolve_versions`])
//! - per-document metadata resolution (id, title, slug, permalink,
//!   [`resolve_docs`])
//! - sidebar-tree flattening with previous/next assignment ([`build_order`])
//! - per-version assembly ([`assemble_version`]) and global aggregation
//!   ([`resolve_site`])
//!
//! # Architecture
//!
//! Each stage is a pure function over immutable inputs; a stage hands its
//! result by value to the next. Per-version pipelines are independent and
//! run on the rayon thread pool; the [`GlobalGraph`] is built only after all
//! of them complete. Any fatal error aborts the whole load cycle: a
//! partially-resolved navigation graph would expose dangling links.
//!
//! Navigation is derived with an index representation (flattened sequence
//! plus id→index map), so the exported structures hold no back-pointers.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use verdoc_config::Config;
//! use verdoc_core::resolve_site;
//!
//! let config = Config::load(None, None)?;
//! let graph = resolve_site(&config)?;
//! println!("{}", graph.latest_version_name);
//! # Ok(())
//! # }
//! ```

pub(crate) mod assemble;
pub(crate) mod error;
pub(crate) mod graph;
pub(crate) mod metadata;
pub(crate) mod sidebar;
pub(crate) mod version;

pub use assemble::{DocMetadata, LoadedVersion, NavLink, assemble_version};
pub use error::LoadError;
pub use graph::{GlobalGraph, ResolveOptions, load_version, resolve_site};
pub use metadata::{DocBase, resolve_docs};
pub use sidebar::{OrderEntry, SidebarNode, SidebarSet, build_order, parse_sidebars};
pub use version::{CURRENT_ROUTE_FRAGMENT, CURRENT_VERSION_NAME, VersionDescriptor, resolve_versions};
