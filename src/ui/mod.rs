//! UI module for consistent CLI output
//!
//! Uses `cliclack` in interactive terminals with automatic fallback to
//! plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use pkgrun::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Installing acme/tool");
//! // ... do work ...
//! spinner.stop("Installed acme/tool");
//!
//! ui::step_warn_hint(&ctx, "acme/tool is stale", "Run: pkgrun update acme/tool");
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, remark, step_info, step_ok,
    step_ok_detail, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
pub use theme::{init_theme, PkgrunTheme};
