//! Enumerates installed package folders under a cache root

use crate::cache::CacheRoot;
use crate::error::{PkgrunError, PkgrunResult};
use crate::package::{Package, LATEST};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A package folder found on disk
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Identity reconstructed from the folder layout
    pub package: Package,
    /// Absolute folder path
    pub path: PathBuf,
    /// Last modification time of the folder
    pub modified: Option<DateTime<Utc>>,
}

impl InstalledPackage {
    /// Check if the folder has not been touched for `days` days
    pub fn is_older_than_days(&self, days: u32) -> bool {
        match self.modified {
            Some(modified) => Utc::now() - modified > chrono::Duration::days(i64::from(days)),
            None => false,
        }
    }
}

/// Scanner over `<root>/<vendor>/<name>/<version>`
pub struct Inventory;

impl Inventory {
    /// List every package folder under the root, sorted by folder
    ///
    /// Hidden entries and folders that do not form a valid reference are
    /// skipped. A missing root yields an empty list.
    pub fn scan(root: &CacheRoot) -> PkgrunResult<Vec<InstalledPackage>> {
        let mut found = Vec::new();

        if !root.path().is_dir() {
            debug!("Cache root {} does not exist", root.path().display());
            return Ok(found);
        }

        for vendor in subdirs(root.path())? {
            for name in subdirs(&root.path().join(&vendor))? {
                let versions_dir = root.path().join(&vendor).join(&name);
                for version in subdirs(&versions_dir)? {
                    // A `latest` folder is owned by the unpinned package; an
                    // explicit `@latest` resolves to the same folder.
                    let reference = if version == LATEST {
                        format!("{}/{}", vendor, name)
                    } else {
                        format!("{}/{}@{}", vendor, name, version)
                    };

                    let package = match Package::parse(&reference) {
                        Ok(package) => package,
                        Err(_) => {
                            debug!("Skipping unrecognised cache folder {}", reference);
                            continue;
                        }
                    };

                    let path = versions_dir.join(&version);
                    let modified = fs::metadata(&path)
                        .and_then(|m| m.modified())
                        .ok()
                        .map(DateTime::<Utc>::from);

                    found.push(InstalledPackage {
                        package,
                        path,
                        modified,
                    });
                }
            }
        }

        found.sort_by_key(|installed| installed.package.folder());
        debug!("Found {} installed packages", found.len());
        Ok(found)
    }
}

/// Names of visible subdirectories
fn subdirs(dir: &Path) -> PkgrunResult<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| PkgrunError::io(format!("reading directory {}", dir.display()), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PkgrunError::io(format!("reading entry in {}", dir.display()), e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scan_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path().join("absent"));
        assert!(Inventory::scan(&root).unwrap().is_empty());
    }

    #[test]
    fn scan_reconstructs_packages() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path());
        fs::create_dir_all(temp.path().join("acme/tool/latest")).unwrap();
        fs::create_dir_all(temp.path().join("acme/tool/1.2.0")).unwrap();
        fs::create_dir_all(temp.path().join("beta/cli/2.0")).unwrap();

        let installed = Inventory::scan(&root).unwrap();
        let folders: Vec<_> = installed.iter().map(|i| i.package.folder()).collect();
        assert_eq!(
            folders,
            vec!["acme/tool/1.2.0", "acme/tool/latest", "beta/cli/2.0"]
        );

        let latest = &installed[1];
        assert!(!latest.package.is_pinned());
        assert_eq!(latest.path, root.resolve(&latest.package));
        assert!(latest.modified.is_some());
    }

    #[test]
    fn latest_folder_matches_explicit_latest() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path());
        let explicit = Package::parse("acme/tool@latest").unwrap();
        fs::create_dir_all(explicit.path_in(&root)).unwrap();

        let installed = Inventory::scan(&root).unwrap();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].package, Package::parse("acme/tool").unwrap());
        assert_eq!(installed[0].path, explicit.path_in(&root));
    }

    #[test]
    fn scan_skips_hidden_and_files() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path());
        fs::create_dir_all(temp.path().join(".tmp/x/y")).unwrap();
        fs::create_dir_all(temp.path().join("acme/tool")).unwrap();
        fs::write(temp.path().join("acme/tool/notes.txt"), "x").unwrap();
        fs::write(temp.path().join(".update-checks.json"), "{}").unwrap();

        assert!(Inventory::scan(&root).unwrap().is_empty());
    }

    #[test]
    fn fresh_folder_is_not_old() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("acme/tool/latest")).unwrap();
        let installed = Inventory::scan(&CacheRoot::new(temp.path())).unwrap();
        assert!(!installed[0].is_older_than_days(1));
    }
}
