//! Installer abstraction
//!
//! An installer puts a package's files into the folder computed for it.
//! The default implementation shells out to a configurable program run
//! inside that folder.

use crate::config::schema::InstallerConfig;
use crate::error::{PkgrunError, PkgrunResult};
use crate::package::{prune_empty_parents, Package};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Installs and refreshes packages inside their cache folder
#[async_trait]
pub trait Installer: Send + Sync {
    /// First install into `dir`, which may not exist yet
    async fn install(&self, package: &Package, dir: &Path) -> PkgrunResult<()>;

    /// Refresh an existing install in `dir`
    async fn update(&self, package: &Package, dir: &Path) -> PkgrunResult<()>;

    /// Get the human-readable installer name for display
    fn installer_name(&self) -> &str;
}

/// Installer that runs an external program in the package folder
pub struct CommandInstaller {
    config: InstallerConfig,
}

impl CommandInstaller {
    /// Create an installer from configuration
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    /// Execute the installer program in `dir` and return the output
    async fn exec(&self, dir: &Path, args: &[String]) -> PkgrunResult<std::process::Output> {
        debug!("Executing in {}: {} {:?}", dir.display(), self.config.program, args);

        Command::new(&self.config.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    PkgrunError::InstallerNotFound(self.config.program.clone())
                } else {
                    PkgrunError::command_failed(
                        format!("{} {:?}", self.config.program, args),
                        e,
                    )
                }
            })
    }

    /// Run and turn a non-zero exit into an install failure
    async fn exec_checked(
        &self,
        package: &Package,
        dir: &Path,
        args: &[String],
    ) -> PkgrunResult<()> {
        let output = self.exec(dir, args).await?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("{} exited with code {}", self.config.program, code),
                None => format!("{} terminated by signal", self.config.program),
            }
        } else {
            stderr
        };
        Err(PkgrunError::install_failed(package.to_string(), reason))
    }
}

#[async_trait]
impl Installer for CommandInstaller {
    async fn install(&self, package: &Package, dir: &Path) -> PkgrunResult<()> {
        info!("Installing {} into {}", package, dir.display());

        fs::create_dir_all(dir)
            .await
            .map_err(|e| PkgrunError::io(format!("creating directory {}", dir.display()), e))?;

        let mut args = self.config.install_args.clone();
        args.push(package.full_package_string());

        if let Err(e) = self.exec_checked(package, dir, &args).await {
            // Leave no half-installed folder behind for the next run to trust
            match fs::remove_dir_all(dir).await {
                Ok(()) => prune_empty_parents(dir),
                Err(cleanup) => warn!("Failed to clean up {}: {}", dir.display(), cleanup),
            }
            return Err(e);
        }

        Ok(())
    }

    async fn update(&self, package: &Package, dir: &Path) -> PkgrunResult<()> {
        info!("Updating {} in {}", package, dir.display());
        self.exec_checked(package, dir, &self.config.update_args)
            .await
    }

    fn installer_name(&self) -> &str {
        &self.config.program
    }
}
