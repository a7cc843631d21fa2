//! Cache folder lifecycle for a package
//!
//! These operations touch only the filesystem under the given cache root.
//! None of them change the in-memory identity.

use crate::cache::{CacheRoot, UpdateCheckStore};
use crate::error::{PkgrunError, PkgrunResult};
use crate::package::Package;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Package {
    /// This package's folder resolved under `root`
    pub fn path_in(&self, root: &CacheRoot) -> PathBuf {
        root.resolve(self)
    }

    /// Whether the folder currently exists on disk
    pub fn exists_in(&self, root: &CacheRoot) -> bool {
        self.path_in(root).is_dir()
    }

    /// Recursively remove this package's folder
    ///
    /// Returns `false` if there was nothing to remove. A stray file at the
    /// folder path is removed too. Empty vendor and name directories left
    /// behind are pruned.
    pub fn delete(&self, root: &CacheRoot) -> PkgrunResult<bool> {
        let path = self.path_in(root);

        let removed = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => {
                debug!("{} is not a directory, removing it", path.display());
                fs::remove_file(&path)
            }
            Err(e) => Err(e),
        };

        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not installed, nothing to delete", self);
                return Ok(false);
            }
            Err(e) => {
                return Err(PkgrunError::io(
                    format!("removing package folder {}", path.display()),
                    e,
                ))
            }
        }

        prune_empty_parents(&path);

        info!("Deleted {} from {}", self, path.display());
        Ok(true)
    }

    /// Whether the installer should probe for a newer release
    ///
    /// Pinned packages never need a check. Unpinned packages need one when
    /// there is no record yet or the last check is older than `interval`.
    pub fn should_check_for_updates(
        &self,
        checks: &dyn UpdateCheckStore,
        interval: Duration,
    ) -> bool {
        self.should_check_for_updates_at(checks, interval, Utc::now())
    }

    /// [`Package::should_check_for_updates`] against an explicit clock
    pub fn should_check_for_updates_at(
        &self,
        checks: &dyn UpdateCheckStore,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> bool {
        if self.is_pinned() {
            return false;
        }

        match checks.last_checked(self) {
            None => true,
            Some(last) => now - last >= interval,
        }
    }
}

/// Remove the name and vendor directories above a package folder once empty
///
/// Stops at the first directory that still has entries, so sibling
/// versions and other packages of the vendor survive.
pub(crate) fn prune_empty_parents(folder: &Path) {
    let mut current = folder.parent();
    for _ in 0..2 {
        let Some(dir) = current else { break };
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}
