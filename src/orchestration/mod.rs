//! Installing and running packages
//!
//! The [`Installer`] and [`Runner`] traits are the seams between the cache
//! model and the outside world; [`Provisioner`] decides when to call them.

pub mod factory;
pub mod installer;
pub mod provisioner;
pub mod runner;

pub use factory::{create_provisioner, create_runner};
pub use installer::{CommandInstaller, Installer};
pub use provisioner::{Provisioned, Provisioner};
pub use runner::{BinRunner, Runner};
