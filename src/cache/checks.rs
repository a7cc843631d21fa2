//! Update-check records for packages tracking `latest`
//!
//! The installer writes a timestamp here each time it installs or re-probes
//! a package; [`Package::should_check_for_updates`] only reads it.
//!
//! [`Package::should_check_for_updates`]: crate::package::Package::should_check_for_updates

use crate::cache::CacheRoot;
use crate::error::{PkgrunError, PkgrunResult};
use crate::package::Package;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// File name of the persisted records inside the cache root
pub const CHECKS_FILE: &str = ".update-checks.json";

/// Key-value store mapping a package identity to its last update check
pub trait UpdateCheckStore: Send + Sync {
    /// When this package was last checked, if ever
    fn last_checked(&self, package: &Package) -> Option<DateTime<Utc>>;

    /// Record a check for this package at `at`
    fn record_check(&self, package: &Package, at: DateTime<Utc>) -> PkgrunResult<()>;

    /// Drop any record for this package
    fn forget(&self, package: &Package) -> PkgrunResult<()>;
}

/// In-memory store, nothing persisted
#[derive(Debug, Default)]
pub struct MemoryCheckStore {
    records: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryCheckStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UpdateCheckStore for MemoryCheckStore {
    fn last_checked(&self, package: &Package) -> Option<DateTime<Utc>> {
        let records = self.records.read().ok()?;
        records.get(&package.folder()).copied()
    }

    fn record_check(&self, package: &Package, at: DateTime<Utc>) -> PkgrunResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PkgrunError::User("update check records poisoned".to_string()))?;
        records.insert(package.folder(), at);
        Ok(())
    }

    fn forget(&self, package: &Package) -> PkgrunResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PkgrunError::User("update check records poisoned".to_string()))?;
        records.remove(&package.folder());
        Ok(())
    }
}

/// JSON file of `folder -> timestamp`, rewritten on every change
#[derive(Debug)]
pub struct FileCheckStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, DateTime<Utc>>>,
}

impl FileCheckStore {
    /// Open the store kept in the cache root
    pub fn open(root: &CacheRoot) -> PkgrunResult<Self> {
        Self::open_at(root.path().join(CHECKS_FILE))
    }

    /// Open a store at an explicit file path; a missing file is empty
    pub fn open_at(path: impl Into<PathBuf>) -> PkgrunResult<Self> {
        let path = path.into();
        let records = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                PkgrunError::io(format!("reading update checks {}", path.display()), e)
            })?;
            serde_json::from_str(&content).map_err(|e| PkgrunError::CheckStoreCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else {
            debug!("No update check records at {}", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, change: F) -> PkgrunResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, DateTime<Utc>>),
    {
        let mut records = self
            .records
            .write()
            .map_err(|_| PkgrunError::User("update check records poisoned".to_string()))?;
        change(&mut records);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PkgrunError::io(format!("creating directory {}", parent.display()), e)
            })?;
        }

        // Write to a sibling and rename so readers never see a torn file
        let content = serde_json::to_string_pretty(&*records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| PkgrunError::io(format!("writing {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| PkgrunError::io(format!("replacing {}", self.path.display()), e))?;
        Ok(())
    }
}

impl UpdateCheckStore for FileCheckStore {
    fn last_checked(&self, package: &Package) -> Option<DateTime<Utc>> {
        let records = self.records.read().ok()?;
        records.get(&package.folder()).copied()
    }

    fn record_check(&self, package: &Package, at: DateTime<Utc>) -> PkgrunResult<()> {
        self.update(|records| {
            records.insert(package.folder(), at);
        })?;
        debug!("Recorded update check for {} at {}", package, at);
        Ok(())
    }

    fn forget(&self, package: &Package) -> PkgrunResult<()> {
        let known = self
            .records
            .read()
            .map(|records| records.contains_key(&package.folder()))
            .unwrap_or(true);
        if !known {
            return Ok(());
        }
        self.update(|records| {
            records.remove(&package.folder());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn package(reference: &str) -> Package {
        Package::parse(reference).unwrap()
    }

    #[test]
    fn memory_store_records_and_forgets() {
        let store = MemoryCheckStore::new();
        let pkg = package("acme/tool");
        assert!(store.last_checked(&pkg).is_none());

        let now = Utc::now();
        store.record_check(&pkg, now).unwrap();
        assert_eq!(store.last_checked(&pkg), Some(now));

        store.forget(&pkg).unwrap();
        assert!(store.last_checked(&pkg).is_none());
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileCheckStore::open(&CacheRoot::new(temp.path())).unwrap();
        assert!(store.last_checked(&package("acme/tool")).is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path());
        let pkg = package("acme/tool");
        let at = Utc::now() - Duration::hours(3);

        FileCheckStore::open(&root)
            .unwrap()
            .record_check(&pkg, at)
            .unwrap();

        let reopened = FileCheckStore::open(&root).unwrap();
        assert_eq!(reopened.last_checked(&pkg), Some(at));
        assert!(reopened.last_checked(&package("acme/other")).is_none());
    }

    #[test]
    fn file_store_forget_persists() {
        let temp = TempDir::new().unwrap();
        let root = CacheRoot::new(temp.path());
        let pkg = package("acme/tool");

        let store = FileCheckStore::open(&root).unwrap();
        store.record_check(&pkg, Utc::now()).unwrap();
        store.forget(&pkg).unwrap();

        let reopened = FileCheckStore::open(&root).unwrap();
        assert!(reopened.last_checked(&pkg).is_none());
    }

    #[test]
    fn file_store_forget_unknown_does_not_write() {
        let temp = TempDir::new().unwrap();
        let store = FileCheckStore::open(&CacheRoot::new(temp.path())).unwrap();
        store.forget(&package("acme/tool")).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_corrupt_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CHECKS_FILE), "not json").unwrap();

        let err = FileCheckStore::open(&CacheRoot::new(temp.path())).unwrap_err();
        assert!(matches!(err, PkgrunError::CheckStoreCorrupt { .. }));
        assert!(err.hint().is_some());
    }
}
