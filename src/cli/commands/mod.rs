//! CLI command implementations

pub mod clean;
pub mod config;
pub mod info;
pub mod install;
pub mod list;
pub mod run;

pub use clean::execute as clean;
pub use config::execute as config;
pub use info::execute as info;
pub use install::{install, update};
pub use list::execute as list;
pub use run::execute as run;
