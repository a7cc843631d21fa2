//! Configuration schema for pkgrun
//!
//! Configuration is stored at `~/.config/pkgrun/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Package cache settings
    pub cache: CacheConfig,

    /// How packages are installed and updated
    pub installer: InstallerConfig,

    /// How entry points are located
    pub runner: RunnerConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Package cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root (defaults to the platform cache directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Hours before a package tracking latest is checked again (0 = never)
    pub update_check_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            update_check_hours: 24,
        }
    }
}

impl CacheConfig {
    /// Update check interval, `None` when checks are disabled
    pub fn update_check_interval(&self) -> Option<chrono::Duration> {
        match self.update_check_hours {
            0 => None,
            hours => Some(chrono::Duration::hours(i64::from(hours))),
        }
    }
}

/// Installer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Program that installs packages into a folder
    pub program: String,

    /// Arguments for a first install; the package string is appended
    pub install_args: Vec<String>,

    /// Arguments to refresh an installed folder
    pub update_args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "composer".to_string(),
            install_args: vec![
                "require".to_string(),
                "--no-interaction".to_string(),
                "--no-progress".to_string(),
            ],
            update_args: vec![
                "update".to_string(),
                "--no-interaction".to_string(),
                "--no-progress".to_string(),
            ],
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory inside a package folder holding entry points
    pub bin_dir: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            bin_dir: "vendor/bin".to_string(),
        }
    }
}
