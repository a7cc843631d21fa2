//! Package identity and cache lifecycle
//!
//! A [`Package`] is parsed from a reference such as `acme/tool@1.2.0` and
//! maps deterministically to a folder under a [`CacheRoot`]:
//!
//! | Reference | Folder | Package string |
//! |-----------|--------|----------------|
//! | `acme/tool` | `acme/tool/latest` | `acme/tool` |
//! | `acme/tool@1.2.0` | `acme/tool/1.2.0` | `acme/tool:1.2.0` |
//! | `acme/tool@latest` | `acme/tool/latest` | `acme/tool:latest` |
//!
//! [`CacheRoot`]: crate::cache::CacheRoot

pub mod identity;
mod lifecycle;

pub use identity::{Package, LATEST};
pub(crate) use lifecycle::prune_empty_parents;
