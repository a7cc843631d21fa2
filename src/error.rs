//! Error types for pkgrun
//!
//! All modules use `PkgrunResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pkgrun operations
pub type PkgrunResult<T> = Result<T, PkgrunError>;

/// All errors that can occur in pkgrun
#[derive(Error, Debug)]
pub enum PkgrunError {
    // Package reference errors
    #[error("A package name must be provided.")]
    PackageNameMissing,

    #[error("A package name should be in the format \"<vendor>/<package>[@<version>]\".")]
    PackageNameFormat { reference: String },

    #[error("Package {0} is not installed")]
    PackageNotInstalled(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("Update check records at {path} are corrupt: {reason}")]
    CheckStoreCorrupt { path: PathBuf, reason: String },

    // Installer / runner errors
    #[error("Installer not found: {0}")]
    InstallerNotFound(String),

    #[error("Failed to install {package}: {reason}")]
    InstallFailed { package: String, reason: String },

    #[error(
        "No entry point found for {} in {}{}",
        .package,
        .dir.display(),
        candidates_suffix(.candidates)
    )]
    EntryPointNotFound {
        package: String,
        dir: PathBuf,
        candidates: Vec<String>,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

fn candidates_suffix(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" (available: {})", candidates.join(", "))
    }
}

impl PkgrunError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create an install failure for a package
    pub fn install_failed(package: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InstallFailed {
            package: package.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PackageNameMissing | Self::PackageNameFormat { .. } => {
                Some("Example: pkgrun run acme/tool or pkgrun run acme/tool@1.2.0")
            }
            Self::PackageNotInstalled(_) => Some("Run: pkgrun install <vendor>/<package>"),
            Self::InstallerNotFound(_) => {
                Some("Install it or point installer.program at it: pkgrun config set installer.program <path>")
            }
            Self::CheckStoreCorrupt { .. } => {
                Some("Delete the file; packages tracking latest will be rechecked")
            }
            Self::EntryPointNotFound { .. } => Some("Pick one with --bin <name>"),
            _ => None,
        }
    }
}
