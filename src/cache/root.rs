//! Cache root location
//!
//! Every path-resolving operation takes a [`CacheRoot`] explicitly so tests
//! and embedders can point at an isolated directory.

use crate::package::Package;
use std::path::{Path, PathBuf};

/// Directory under which all package folders live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    path: PathBuf,
}

impl CacheRoot {
    /// Use an explicit directory as the cache root
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform cache directory, e.g. `~/.cache/pkgrun` on Linux
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("pkgrun")
    }

    /// The root directory itself
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute location of a package's folder under this root
    ///
    /// Joined per component so the result uses the platform separator.
    pub fn resolve(&self, package: &Package) -> PathBuf {
        self.path
            .join(package.vendor())
            .join(package.name())
            .join(package.version_name())
    }
}

impl Default for CacheRoot {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_folder() {
        let root = CacheRoot::new("/cache");
        let package = Package::parse("test/test@1.0.0").unwrap();
        assert_eq!(
            root.resolve(&package),
            PathBuf::from("/cache").join(package.folder())
        );
    }

    #[test]
    fn resolve_latest() {
        let root = CacheRoot::new("/cache");
        let package = Package::parse("acme/tool").unwrap();
        assert!(root.resolve(&package).ends_with("acme/tool/latest"));
    }

    #[test]
    fn default_ends_with_app_dir() {
        assert!(CacheRoot::default().path().ends_with("pkgrun"));
    }
}
