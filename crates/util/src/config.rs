//! Configuration for the Vellum picker.
//!
//! The configuration is a small JSON document stored in the standard
//! configuration directory (`~/.config/vellum/config.json` on most platforms).
//! A missing file yields the defaults; `VELLUM_CONFIG_PATH` overrides the
//! location.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::expand_tilde;

/// Environment variable allowing callers to override the configuration file path.
pub const CONFIG_PATH_ENV: &str = "VELLUM_CONFIG_PATH";

/// Default filename for the configuration document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default filename for the local document store.
pub const STORAGE_FILE_NAME: &str = "storage.json";

static MOUNT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9._-]+$").expect("mount id pattern"));

/// Error surfaced when the configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid mount '{id}': {reason}")]
    InvalidMount { id: String, reason: String },

    #[error("mount '{id}' is declared more than once")]
    DuplicateMount { id: String },
}

/// A local directory exposed as a login-gated remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MountConfig {
    /// Stable backend identifier (lowercase letters, digits, `.`, `_`, `-`).
    pub id: String,
    /// Label shown in the backend list; defaults to the id.
    #[serde(default)]
    pub label: Option<String>,
    /// Directory to mount; `~` is expanded.
    pub path: String,
}

impl MountConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn resolved_path(&self) -> PathBuf {
        expand_tilde(&self.path)
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VellumConfig {
    /// Location of the local document store; defaults to the config directory.
    #[serde(default)]
    pub storage_path: Option<String>,
    /// Text pre-filled in the "new file name" prompt.
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
    /// Whether open mode offers importing a file from the device.
    #[serde(default = "default_device_import")]
    pub device_import: bool,
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
}

fn default_file_name() -> String {
    ".json".to_string()
}

fn default_device_import() -> bool {
    true
}

impl Default for VellumConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            default_file_name: default_file_name(),
            device_import: default_device_import(),
            mounts: Vec::new(),
        }
    }
}

impl VellumConfig {
    /// Resolved location of the local document store.
    pub fn storage_path(&self) -> PathBuf {
        match self.storage_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => expand_tilde(path),
            _ => default_config_dir().join(STORAGE_FILE_NAME),
        }
    }

    /// Checks mount identifiers for shape and uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for mount in &self.mounts {
            if !MOUNT_ID.is_match(&mount.id) {
                return Err(ConfigError::InvalidMount {
                    id: mount.id.clone(),
                    reason: "id must contain only lowercase letters, numbers, dots, underscores, and hyphens".to_string(),
                });
            }
            if mount.id == "local" {
                return Err(ConfigError::InvalidMount {
                    id: mount.id.clone(),
                    reason: "'local' is reserved for the local document store".to_string(),
                });
            }
            if mount.path.trim().is_empty() {
                return Err(ConfigError::InvalidMount {
                    id: mount.id.clone(),
                    reason: "path cannot be empty".to_string(),
                });
            }
            if !seen.insert(mount.id.as_str()) {
                return Err(ConfigError::DuplicateMount { id: mount.id.clone() });
            }
            debug!(mount = %mount.id, "validated mount configuration");
        }
        Ok(())
    }
}

/// Directory holding the configuration, the local store, and the log file.
pub fn default_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("vellum")
}

/// Returns the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    default_config_dir().join(CONFIG_FILE_NAME)
}

/// Loads the configuration from the default path.
pub fn load_config() -> Result<VellumConfig, ConfigError> {
    load_config_from_path(&default_config_path())
}

/// Loads and validates the configuration stored at `path`.
pub fn load_config_from_path(path: &Path) -> Result<VellumConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(VellumConfig::default());
        }
        Err(error) => return Err(ConfigError::Io(error)),
    };
    let config: VellumConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
