//! Walk configuration, read from `mdlinks.toml`

use mdlinks_core::{LinkGraphError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the scan root when none is given explicitly.
pub const CONFIG_FILE: &str = "mdlinks.toml";

/// How the builder walks the tree.
///
/// ```toml
/// follow_links = true
/// max_depth = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Descend into symlinked directories.
    pub follow_links: bool,
    /// Maximum directory depth below the root; unlimited when unset.
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    /// Parse config text. `path` is only used in error messages.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| LinkGraphError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a config file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LinkGraphError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text, path)?;
        tracing::debug!("Loaded walk config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// `root/mdlinks.toml` if present, otherwise defaults.
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate = default_path(root);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn default_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
