//! Configuration for the Healthz client.
//!
//! Config file resolution order:
//! 1. Explicit path passed to Config::load()
//! 2. HEALTHZ_CONFIG environment variable
//! 3. Default: ~/.config/healthz/config.toml
//!
//! A missing file yields the defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming the config file.
pub const HEALTHZ_CONFIG_VAR: &str = "HEALTHZ_CONFIG";

/// Healthz client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Device address (host:port).
    #[serde(default = "default_target")]
    pub target: String,

    /// Username attached to every call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password attached to every call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Per-call timeout in seconds (0 = no deadline).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Device-state snapshot answered by the in-memory service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_state: Option<PathBuf>,
}

fn default_target() -> String {
    "localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: default_target(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            device_state: None,
        }
    }
}

impl Config {
    /// Load config using the standard resolution order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Resolve the config file path using the standard resolution order.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    // 1. Explicit path
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    // 2. Environment variable
    if let Ok(path) = std::env::var(HEALTHZ_CONFIG_VAR) {
        return Some(PathBuf::from(path));
    }

    // 3. XDG config directory (via directories crate)
    ProjectDirs::from("", "", "healthz").map(|dirs| dirs.config_dir().join("config.toml"))
}
