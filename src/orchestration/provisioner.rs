//! Install-if-missing, refresh-if-stale
//!
//! Drives an [`Installer`] against the folder a [`Package`] maps to and
//! keeps the update-check records current.

use crate::cache::{CacheRoot, UpdateCheckStore};
use crate::error::{PkgrunError, PkgrunResult};
use crate::orchestration::installer::Installer;
use crate::package::Package;
use chrono::{Duration, Utc};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// What [`Provisioner::ensure_installed`] had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// Folder was absent and has been installed
    Installed,
    /// Folder existed and was refreshed
    Updated,
    /// Folder existed and was reused as-is
    Cached,
}

impl fmt::Display for Provisioned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Installed => "installed",
            Self::Updated => "updated",
            Self::Cached => "cached",
        };
        write!(f, "{}", name)
    }
}

/// Keeps package folders under one cache root installed and fresh
pub struct Provisioner {
    root: CacheRoot,
    checks: Box<dyn UpdateCheckStore>,
    installer: Box<dyn Installer>,
    update_interval: Option<Duration>,
}

impl Provisioner {
    /// `update_interval` of `None` disables update checks
    pub fn new(
        root: CacheRoot,
        checks: Box<dyn UpdateCheckStore>,
        installer: Box<dyn Installer>,
        update_interval: Option<Duration>,
    ) -> Self {
        Self {
            root,
            checks,
            installer,
            update_interval,
        }
    }

    pub fn root(&self) -> &CacheRoot {
        &self.root
    }

    pub fn checks(&self) -> &dyn UpdateCheckStore {
        &*self.checks
    }

    pub fn installer_name(&self) -> &str {
        self.installer.installer_name()
    }

    /// Folder for a package under this provisioner's root
    pub fn path_of(&self, package: &Package) -> PathBuf {
        package.path_in(&self.root)
    }

    /// Whether an installed package is due for an update check
    pub fn is_stale(&self, package: &Package) -> bool {
        match self.update_interval {
            Some(interval) => package.should_check_for_updates(&*self.checks, interval),
            None => false,
        }
    }

    /// Make sure the package is installed, refreshing it when due
    ///
    /// `refresh` forces an update of an existing folder, pinned or not.
    pub async fn ensure_installed(
        &self,
        package: &Package,
        refresh: bool,
    ) -> PkgrunResult<Provisioned> {
        if !package.exists_in(&self.root) {
            self.install(package).await?;
            return Ok(Provisioned::Installed);
        }

        if refresh || self.is_stale(package) {
            self.update(package).await?;
            return Ok(Provisioned::Updated);
        }

        debug!("Using cached {}", package);
        Ok(Provisioned::Cached)
    }

    /// Install the package into its folder and record the check
    pub async fn install(&self, package: &Package) -> PkgrunResult<()> {
        let dir = self.path_of(package);
        self.installer.install(package, &dir).await?;
        self.checks.record_check(package, Utc::now())?;
        info!("Installed {} at {}", package, dir.display());
        Ok(())
    }

    /// Refresh an installed package and record the check
    pub async fn update(&self, package: &Package) -> PkgrunResult<()> {
        if !package.exists_in(&self.root) {
            return Err(PkgrunError::PackageNotInstalled(package.to_string()));
        }

        let dir = self.path_of(package);
        self.installer.update(package, &dir).await?;
        self.checks.record_check(package, Utc::now())?;
        info!("Updated {}", package);
        Ok(())
    }

    /// Delete the package folder and its check record
    pub fn remove(&self, package: &Package) -> PkgrunResult<bool> {
        let removed = package.delete(&self.root)?;
        self.checks.forget(package)?;
        Ok(removed)
    }
}
