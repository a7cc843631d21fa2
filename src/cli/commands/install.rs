//! Install and update commands

use crate::cache::CacheRoot;
use crate::cli::args::PackageArgs;
use crate::cli::commands::run::provision;
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::orchestration::{create_provisioner, Provisioned};
use crate::package::Package;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the install command
pub async fn install(args: PackageArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<()> {
    let package = Package::parse(&args.package)?;
    let provisioner = create_provisioner(config, root.clone())?;

    let outcome = provision(&provisioner, &package, false).await?;
    if outcome == Provisioned::Cached {
        let ctx = UiContext::detect();
        ui::step_ok_detail(
            &ctx,
            &format!("{} already installed", package),
            &provisioner.path_of(&package).display().to_string(),
        );
    }

    Ok(())
}

/// Execute the update command
pub async fn update(args: PackageArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<()> {
    let package = Package::parse(&args.package)?;
    let provisioner = create_provisioner(config, root.clone())?;
    let ctx = UiContext::detect();

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Updating {}", package));

    match provisioner.update(&package).await {
        Ok(()) => {
            spinner.stop(&format!("Updated {}", package));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error(&format!("Could not update {}", package));
            Err(e)
        }
    }
}
