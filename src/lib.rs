//! pkgrun - Run versioned packages on demand
//!
//! Parses package references into a canonical identity, maps each identity
//! to a deterministic folder under a cache root, decides when a cached
//! `latest` install is due for an update check, and removes cached copies.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod package;
pub mod ui;

pub use cache::CacheRoot;
pub use error::{PkgrunError, PkgrunResult};
pub use package::Package;
