//! Run command - install if missing, refresh if stale, execute

use crate::cache::CacheRoot;
use crate::cli::args::RunArgs;
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::orchestration::{create_provisioner, create_runner, Provisioned, Provisioner};
use crate::package::Package;
use crate::ui::{TaskSpinner, UiContext};
use tracing::debug;

/// Execute the run command, returning the package's exit code
pub async fn execute(args: RunArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<i32> {
    let package = Package::parse(&args.package)?;
    let provisioner = create_provisioner(config, root.clone())?;

    provision(&provisioner, &package, args.refresh).await?;

    let runner = create_runner(config);
    let dir = provisioner.path_of(&package);
    debug!("Running {} from {}", package, dir.display());

    runner
        .run(&package, &dir, args.bin.as_deref(), &args.args)
        .await
}

/// Install or refresh with a spinner; silent when the cached copy is reused
pub(crate) async fn provision(
    provisioner: &Provisioner,
    package: &Package,
    refresh: bool,
) -> PkgrunResult<Provisioned> {
    let ctx = UiContext::detect();

    let message = if !package.exists_in(provisioner.root()) {
        Some(format!(
            "Installing {} with {}",
            package.reference(),
            provisioner.installer_name()
        ))
    } else if refresh || provisioner.is_stale(package) {
        Some(format!("Checking {} for updates", package))
    } else {
        None
    };

    let Some(message) = message else {
        return provisioner.ensure_installed(package, refresh).await;
    };

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&message);

    match provisioner.ensure_installed(package, refresh).await {
        Ok(outcome) => {
            spinner.stop(&format!("{} {}", capitalize(&outcome.to_string()), package));
            Ok(outcome)
        }
        Err(e) => {
            spinner.stop_error(&format!("Could not provision {}", package));
            Err(e)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
