//! User configuration for git-pulse.
//!
//! Read from `<config dir>/git-pulse/config.json` when present. Every field has a
//! default, so a partial file (or none at all) is valid. The file is input only;
//! git-pulse never writes it.

use crate::core::dirs::get_config_file;
use crate::core::error::{GitPulseError, Result};
use crate::core::monitor::MonitorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides `git_executable` when set
pub const GIT_EXECUTABLE_ENV: &str = "GIT_PULSE_GIT";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// git binary, resolved through `PATH` when not absolute
    pub git_executable: PathBuf,
    /// Debounce window for filesystem changes, in milliseconds
    pub debounce_ms: u64,
    pub metadata_dir: String,
    pub lock_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_executable: PathBuf::from("git"),
            debounce_ms: 1000,
            metadata_dir: ".git".to_string(),
            lock_extension: "lock".to_string(),
        }
    }
}

impl Config {
    /// Load the user's config file if it exists, else defaults; env overrides apply to both
    pub fn load_or_default() -> Result<Self> {
        let config_file = get_config_file()?;
        let config = if config_file.exists() {
            Self::from_file(&config_file)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GitPulseError::config_read(path, e))?;
        serde_json::from_str(&content).map_err(|e| GitPulseError::config_parse(path, e))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(git) = std::env::var_os(GIT_EXECUTABLE_ENV).filter(|v| !v.is_empty()) {
            self.git_executable = PathBuf::from(git);
        }
        self
    }

    pub fn monitor_options(&self) -> MonitorOptions {
        MonitorOptions {
            debounce: Duration::from_millis(self.debounce_ms),
            metadata_dir: self.metadata_dir.clone(),
            lock_extension: self.lock_extension.clone(),
        }
    }
}
