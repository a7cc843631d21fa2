//! Package cache bookkeeping
//!
//! Packages live at `<root>/<vendor>/<name>/<version>`, where `<version>`
//! is `latest` for unpinned packages.
//!
//! # Folder States
//!
//! | State | Description |
//! |-------|-------------|
//! | Absent | No folder, installer will create it |
//! | Fresh | Installed, pinned or checked within the interval |
//! | Stale | Tracking `latest` and not checked within the interval |
//!
//! A stale folder becomes fresh again once the installer re-checks it and
//! records the time in an [`UpdateCheckStore`].

pub mod checks;
pub mod inventory;
pub mod root;

pub use checks::{FileCheckStore, MemoryCheckStore, UpdateCheckStore, CHECKS_FILE};
pub use inventory::{InstalledPackage, Inventory};
pub use root::CacheRoot;
