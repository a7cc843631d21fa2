//! Info command - identity and cache details for one package

use crate::cache::{CacheRoot, FileCheckStore, UpdateCheckStore};
use crate::cli::args::PackageArgs;
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::package::Package;
use crate::ui::{self, UiContext};

/// Execute the info command
pub async fn execute(args: PackageArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<()> {
    let package = Package::parse(&args.package)?;
    let checks = FileCheckStore::open(root)?;
    let ctx = UiContext::detect();

    ui::intro(&ctx, &package.to_string());

    ui::key_value(&ctx, "vendor", package.vendor());
    ui::key_value(&ctx, "name", package.name());
    ui::key_value(&ctx, "version", package.version_name());
    ui::key_value(&ctx, "package string", &package.full_package_string());
    ui::key_value(&ctx, "folder", &package.folder());
    ui::key_value(&ctx, "path", &package.path_in(root).display().to_string());

    let installed = package.exists_in(root);
    ui::key_value_status(
        &ctx,
        "installed",
        if installed { "yes" } else { "no" },
        installed,
    );

    if package.is_pinned() {
        ui::remark(&ctx, "Pinned versions are never checked for updates");
        return Ok(());
    }

    let last_checked = checks
        .last_checked(&package)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    ui::key_value(&ctx, "last checked", &last_checked);

    match config.cache.update_check_interval() {
        Some(interval) => {
            let due = package.should_check_for_updates(&checks, interval);
            ui::key_value_status(
                &ctx,
                "update check",
                if due { "due" } else { "not due" },
                !due,
            );
        }
        None => ui::remark(&ctx, "Update checks are disabled"),
    }

    Ok(())
}
