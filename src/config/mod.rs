//! Curator configuration (curator.toml)
//!
//! Every key is optional; an absent file means built-in defaults. Relative
//! paths resolve against the project root given on the command line.

mod defaults;

pub use defaults::{
    ALLOWLIST_PATH, ASSET_BASE_URL, CONFIG_FILE, GALLERY_FILE, IMAGES_DIR, MANIFEST_FILE,
    REFERENCES_PATH, SNIPPETS_DIR,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Prune configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PruneConfig {
    /// Glob patterns (relative to the images dir) never offered for deletion
    #[serde(default)]
    pub keep: Vec<String>,
}

/// Configuration from curator.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CuratorConfig {
    /// Images root with one subdirectory per category
    #[serde(default = "defaults::images_dir")]
    pub images_dir: String,

    /// Output directory for HTML snippets
    #[serde(default = "defaults::snippets_dir")]
    pub snippets_dir: String,

    /// Manifest output (default: <images_dir>/manifest.json)
    #[serde(default)]
    pub manifest_path: Option<String>,

    /// Gallery output (default: <snippets_dir>/gallery-items.html)
    #[serde(default)]
    pub gallery_path: Option<String>,

    /// Optional allowlist JSON
    #[serde(default = "defaults::allowlist_path")]
    pub allowlist_path: String,

    /// Reference list consumed by `prune`
    #[serde(default = "defaults::references_path")]
    pub references_path: String,

    /// URL prefix for image references in the gallery fragment
    #[serde(default = "defaults::asset_base_url")]
    pub asset_base_url: String,

    /// Prune settings
    #[serde(default)]
    pub prune: PruneConfig,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            images_dir: defaults::images_dir(),
            snippets_dir: defaults::snippets_dir(),
            manifest_path: None,
            gallery_path: None,
            allowlist_path: defaults::allowlist_path(),
            references_path: defaults::references_path(),
            asset_base_url: defaults::asset_base_url(),
            prune: PruneConfig::default(),
        }
    }
}

impl CuratorConfig {
    /// Load and parse config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse config from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: CuratorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the effective config for a project root.
    ///
    /// An explicit path must exist. Without one, `<root>/curator.toml` is used
    /// when present and built-in defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => {
                let path = root.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "'asset_base_url' must not be empty".to_string(),
            ));
        }
        if !self.asset_base_url.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "'asset_base_url' must be an absolute URL path, got '{}'",
                self.asset_base_url
            )));
        }
        for (key, value) in [
            ("images_dir", &self.images_dir),
            ("snippets_dir", &self.snippets_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "'{}' must not be empty",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Resolve every path against `root`.
    pub fn resolve(&self, root: &Path) -> CuratorPaths {
        let images_dir = root.join(&self.images_dir);
        let snippets_dir = root.join(&self.snippets_dir);
        let manifest_path = match &self.manifest_path {
            Some(p) => root.join(p),
            None => images_dir.join(MANIFEST_FILE),
        };
        let gallery_path = match &self.gallery_path {
            Some(p) => root.join(p),
            None => snippets_dir.join(GALLERY_FILE),
        };
        CuratorPaths {
            root: root.to_path_buf(),
            allowlist_path: root.join(&self.allowlist_path),
            references_path: root.join(&self.references_path),
            images_dir,
            snippets_dir,
            manifest_path,
            gallery_path,
        }
    }

    /// URL prefix without a trailing slash.
    pub fn asset_base(&self) -> &str {
        self.asset_base_url.trim_end_matches('/')
    }
}

/// Concrete filesystem locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratorPaths {
    pub root: PathBuf,
    pub images_dir: PathBuf,
    pub snippets_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub gallery_path: PathBuf,
    pub allowlist_path: PathBuf,
    pub references_path: PathBuf,
}

impl CuratorPaths {
    /// Path relative to the project root, for log messages.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
