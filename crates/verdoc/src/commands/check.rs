//! `check` command: validate the site without writing output.

use std::path::PathBuf;

use clap::Args;
use verdoc_config::{CliSettings, Config};
use verdoc_core::resolve_site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `check` command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to the configuration file (searched in parent directories when
    /// omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the docs source directory for the current version.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let graph = resolve_site(&config)?;

        output.highlight("Versions");
        for version in &graph.versions {
            let route = if version.route_path_fragment.is_empty() {
                "unversioned route".to_owned()
            } else {
                format!("route '{}'", version.route_path_fragment)
            };
            output.info(&format!(
                "  {} - {} documents, main '{}', {}",
                version.name,
                version.docs.len(),
                version.main_doc_id,
                route
            ));
        }
        output.success(&format!(
            "OK: {} versions, {} documents, latest '{}'",
            graph.versions.len(),
            graph.doc_count(),
            graph.latest_version_name
        ));

        Ok(())
    }
}
