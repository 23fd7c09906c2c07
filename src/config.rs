use anyhow::{Context, Result};
use rolekit::PlaybookOptions;
use rolekit::backend::ansible::{DEFAULT_GALAXY, DEFAULT_PLAYBOOK};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths;

// ============================================================================
// Config Schema
// ============================================================================

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Role package manager executable
    #[serde(default = "default_galaxy")]
    pub galaxy: String,

    /// Playbook runner executable
    #[serde(default = "default_playbook")]
    pub playbook: String,

    /// `become` / `become_method` for the synthesized playbook
    #[serde(flatten)]
    pub playbook_options: PlaybookOptions,

    /// Default module path when `--module-path` is not given
    #[serde(default)]
    pub module_path: Option<String>,
}

fn default_galaxy() -> String {
    DEFAULT_GALAXY.to_string()
}

fn default_playbook() -> String {
    DEFAULT_PLAYBOOK.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            galaxy: default_galaxy(),
            playbook: default_playbook(),
            playbook_options: PlaybookOptions::default(),
            module_path: None,
        }
    }
}

impl Config {
    /// Load the config from the config directory, or defaults if there is
    /// no config file.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    /// Load the config from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))
    }

    /// Configured default module path, with ~ and variables expanded
    pub fn module_path(&self) -> Option<PathBuf> {
        self.module_path.as_deref().map(paths::expand)
    }
}

// ============================================================================
// Tests
// ============================================================================
