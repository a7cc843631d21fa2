//! Clean command - remove installed packages

use crate::cache::{CacheRoot, Inventory};
use crate::cli::args::CleanArgs;
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::orchestration::create_provisioner;
use crate::package::Package;
use crate::ui::{self, UiContext};
use console::style;
use tracing::debug;

/// Execute the clean command
pub async fn execute(args: CleanArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    // Parse everything up front so a typo removes nothing
    let targets: Vec<Package> = if args.all {
        Inventory::scan(root)?.into_iter().map(|i| i.package).collect()
    } else if let Some(days) = args.older_than {
        Inventory::scan(root)?
            .into_iter()
            .filter(|i| i.is_older_than_days(days))
            .map(|i| i.package)
            .collect()
    } else {
        args.packages
            .iter()
            .map(|reference| Package::parse(reference))
            .collect::<PkgrunResult<_>>()?
    };

    if targets.is_empty() {
        ui::step_info(&ctx, "Nothing to remove");
        return Ok(());
    }

    let provisioner = create_provisioner(config, root.clone())?;

    // Explicitly named packages need no confirmation
    let bulk = args.all || args.older_than.is_some();
    if bulk || args.dry_run {
        println!("This will remove {} package(s):", targets.len());
        for package in &targets {
            println!("  {} {}", style("•").red(), package.folder());
        }
        println!();
    }

    if args.dry_run {
        println!("Dry run - nothing removed.");
        return Ok(());
    }

    if bulk && !ui::confirm(&ctx, "Remove these packages?", false).await? {
        ui::remark(&ctx, "Aborted");
        return Ok(());
    }

    let mut removed = 0;
    for package in &targets {
        debug!("Removing {}", package);
        if provisioner.remove(package)? {
            removed += 1;
            ui::step_ok(&ctx, &format!("Removed {}", package.reference()));
        } else {
            ui::step_warn_hint(
                &ctx,
                &format!("{} is not installed", package.reference()),
                "nothing to remove",
            );
        }
    }

    debug!("Removed {} of {} package(s)", removed, targets.len());
    Ok(())
}
