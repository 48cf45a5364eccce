//! `resolve` command: resolve the site and write the registry JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use verdoc_config::{CliSettings, Config};
use verdoc_core::resolve_site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `resolve` command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Path to the configuration file (searched in parent directories when
    /// omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the docs source directory for the current version.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Write the registry to this file instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let graph = resolve_site(&config)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&graph)?
        } else {
            serde_json::to_string(&graph)?
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, &json)?;
                output.success(&format!(
                    "Resolved {} versions ({} documents) to {}",
                    graph.versions.len(),
                    graph.doc_count(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}
