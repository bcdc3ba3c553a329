//
//  jira-cli
//  config/mod.rs
//

//! # Persistent Configuration
//!
//! A single small JSON file holding non-secret defaults (currently just
//! the base URL). Tokens never land here; they belong to the keychain.
//!
//! Loading is permissive: a missing or unreadable file yields the default
//! configuration so the CLI keeps working and `auth login` can rewrite it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Non-secret persisted settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default deployment base URL, set by `jira auth login`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    /// Returns the platform-specific config file path.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jira-cli").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the config from the default location.
    ///
    /// Any failure (no home directory, missing file, corrupt JSON) falls
    /// back to the default; corruption is logged, not fatal.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads the config from an explicit path.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring corrupt config at {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves the config to the default location, creating parent
    /// directories as needed.
    pub fn save(&self) -> io::Result<()> {
        let path = Self::path()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        self.save_to(&path)
    }

    /// Saves the config to an explicit path.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }
}
