//! Package references and their canonical identity
//!
//! A reference is `<vendor>/<name>` or `<vendor>/<name>@<version>`.
//! Parsing is the only way to build a [`Package`], and the result is
//! immutable.

use crate::error::{PkgrunError, PkgrunResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Version alias used by packages that are not pinned
pub const LATEST: &str = "latest";

/// A parsed package identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Package {
    vendor: String,
    name: String,
    version: Option<String>,
}

impl Package {
    /// Parse a package reference
    ///
    /// Splits on the first `@` for the version, then on the first `/` for
    /// vendor and name. Nothing is trimmed or case-folded. An explicit
    /// `@latest` is kept as a pinned version; it shares its cache folder
    /// with the unpinned package.
    pub fn parse(reference: &str) -> PkgrunResult<Self> {
        if reference.is_empty() {
            return Err(PkgrunError::PackageNameMissing);
        }

        let format_error = || PkgrunError::PackageNameFormat {
            reference: reference.to_string(),
        };

        let (base, version) = match reference.split_once('@') {
            Some((base, version)) => (base, Some(version)),
            None => (reference, None),
        };

        let (vendor, name) = base.split_once('/').ok_or_else(format_error)?;

        if !is_valid_segment(vendor) || !is_valid_segment(name) {
            return Err(format_error());
        }

        if let Some(version) = version {
            if !is_valid_version(version) {
                return Err(format_error());
            }
        }

        Ok(Self {
            vendor: vendor.to_string(),
            name: name.to_string(),
            version: version.map(str::to_string),
        })
    }

    /// Namespace segment before the `/`
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Package segment after the `/`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicitly pinned version, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether this package is pinned to an explicit version
    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }

    /// The pinned version, or `latest` for unpinned packages
    pub fn version_name(&self) -> &str {
        self.version.as_deref().unwrap_or(LATEST)
    }

    /// Cache folder relative to the cache root: `<vendor>/<name>/<version_name>`
    pub fn folder(&self) -> String {
        format!("{}/{}/{}", self.vendor, self.name, self.version_name())
    }

    /// Installer-facing package string: `<vendor>/<name>[:<version>]`
    pub fn full_package_string(&self) -> String {
        self.to_string()
    }

    /// The reference this package was parsed from, in `@` form
    pub fn reference(&self) -> String {
        match &self.version {
            Some(version) => format!("{}/{}@{}", self.vendor, self.name, version),
            None => format!("{}/{}", self.vendor, self.name),
        }
    }
}

/// Vendor and name segments: non-empty, no separators, not a relative path
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '@'])
}

/// Versions may contain `/` in the reference grammar, but a folder must stay
/// exactly three levels deep, so path separators are rejected too.
fn is_valid_version(version: &str) -> bool {
    is_valid_segment(version)
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}:{}", self.vendor, self.name, version),
            None => write!(f, "{}/{}", self.vendor, self.name),
        }
    }
}

impl FromStr for Package {
    type Err = PkgrunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
