//! CLI error types.

use verdoc_config::ConfigError;
use verdoc_core::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}
