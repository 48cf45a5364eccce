//! Configuration management for Verdoc.
//!
//! Parses `verdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every recognized option is an explicit field with a documented effect;
//! the configuration is validated once at load time, before the resolution
//! cycle starts. CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "verdoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the docs source directory for the current version.
    pub source_dir: Option<PathBuf>,
    /// Override the site base URL.
    pub base_url: Option<String>,
    /// Override the home document id.
    pub home_id: Option<String>,
    /// Override whether the unreleased "current" version is included.
    pub include_current: Option<bool>,
    /// Override whether historical versions are included.
    pub include_historical: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-level routing configuration.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsConfigRaw,
    /// Version set configuration.
    pub versions: VersionsConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-level routing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site base URL. Must start with `/`; permalinks are prefixed with it.
    pub base_url: String,
    /// Route base path inserted between the base URL and version fragments.
    /// May be empty for docs-only sites served at the root.
    pub route_base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            route_base_path: "docs".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    versioned_dir: Option<String>,
    sidebars_file: Option<String>,
    versioned_sidebars_dir: Option<String>,
    include: Option<Vec<String>>,
    home_id: Option<String>,
    strict_home: Option<bool>,
    admonitions: Option<bool>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Clone, Debug, Default)]
pub struct DocsConfig {
    /// Source directory for the current (unreleased) version's markdown files.
    pub source_dir: PathBuf,
    /// Directory holding historical version snapshots (`version-<name>/`).
    pub versioned_dir: PathBuf,
    /// Sidebar definition file for the current version.
    pub sidebars_file: PathBuf,
    /// Directory holding historical sidebar definitions (`version-<name>.yaml`).
    pub versioned_sidebars_dir: PathBuf,
    /// Glob patterns selecting which files count as documents.
    pub include: Vec<String>,
    /// Explicit home document id, used when no document has slug `/`.
    pub home_id: Option<String>,
    /// Fail instead of guessing when no home document can be determined.
    pub strict_home: bool,
    /// Whether admonition directives are enabled. Forwarded to the renderer;
    /// the resolution engine does not interpret it.
    pub admonitions: bool,
}

/// Version set configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Released version names, most recent first. The first entry is the
    /// "latest" version served at the unversioned route.
    pub names: Vec<String>,
    /// Include the unreleased "current" version (served under `next`).
    pub include_current: bool,
    /// Include historical versions (every declared name after the first).
    pub include_historical: bool,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            include_current: true,
            include_historical: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `verdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url.clone_from(base_url);
        }
        if let Some(home_id) = &settings.home_id {
            self.docs_resolved.home_id = Some(home_id.clone());
        }
        if let Some(include_current) = settings.include_current {
            self.versions.include_current = include_current;
        }
        if let Some(include_historical) = settings.include_historical {
            self.versions.include_historical = include_historical;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            versions: VersionsConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                versioned_dir: base.join("versioned_docs"),
                sidebars_file: base.join("sidebars.yaml"),
                versioned_sidebars_dir: base.join("versioned_sidebars"),
                include: vec!["**/*.md".to_owned()],
                home_id: None,
                strict_home: false,
                admonitions: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            versioned_dir: resolve(self.docs.versioned_dir.as_deref(), "versioned_docs"),
            sidebars_file: resolve(self.docs.sidebars_file.as_deref(), "sidebars.yaml"),
            versioned_sidebars_dir: resolve(
                self.docs.versioned_sidebars_dir.as_deref(),
                "versioned_sidebars",
            ),
            include: self
                .docs
                .include
                .clone()
                .unwrap_or_else(|| vec!["**/*.md".to_owned()]),
            home_id: self.docs.home_id.clone(),
            strict_home: self.docs.strict_home.unwrap_or(false),
            admonitions: self.docs.admonitions.unwrap_or(true),
        };
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file and after CLI
    /// settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_versions()?;
        self.validate_docs()?;
        Ok(())
    }

    /// Validate site routing configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        if !self.site.base_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start with '/'".to_owned(),
            ));
        }
        // route_base_path may be empty (docs served at the site root), but a
        // leading slash would double up during permalink normalization.
        if self.site.route_base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.route_base_path must not start with '/'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate the version set.
    fn validate_versions(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for name in &self.versions.names {
            require_non_empty(name, "versions.names entries")?;
            if name == "current" {
                return Err(ConfigError::Validation(
                    "versions.names must not contain the reserved name 'current'".to_owned(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "versions.names contains duplicate entry '{name}'"
                )));
            }
        }
        if self.versions.names.is_empty() && !self.versions.include_current {
            return Err(ConfigError::Validation(
                "no versions configured: versions.names is empty and include_current is false"
                    .to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        if self.docs_resolved.include.is_empty() {
            return Err(ConfigError::Validation(
                "docs.include cannot be empty".to_owned(),
            ));
        }
        for pattern in &self.docs_resolved.include {
            require_non_empty(pattern, "docs.include entries")?;
        }
        if let Some(home_id) = &self.docs_resolved.home_id {
            require_non_empty(home_id, "docs.home_id")?;
        }
        Ok(())
    }
}
