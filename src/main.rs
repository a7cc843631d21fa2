//! pkgrun - Run versioned packages on demand
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pkgrun::cli::{Cli, Commands};
use pkgrun::config::{resolve_cache_root, ConfigManager};
use pkgrun::error::PkgrunResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PkgrunResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    pkgrun::ui::init_theme();

    let root = resolve_cache_root(cli.cache_dir.as_deref(), &config);
    debug!("Using cache root {}", root.path().display());

    // Dispatch to command
    match cli.command {
        Commands::Run(args) => {
            let code = pkgrun::cli::commands::run(args, &config, &root).await?;
            debug!("Package exited with code {}", code);
            return Ok(exit_code(code));
        }
        Commands::Install(args) => pkgrun::cli::commands::install(args, &config, &root).await?,
        Commands::Update(args) => pkgrun::cli::commands::update(args, &config, &root).await?,
        Commands::List(args) => pkgrun::cli::commands::list(args, &config, &root).await?,
        Commands::Info(args) => pkgrun::cli::commands::info(args, &config, &root).await?,
        Commands::Clean(args) => pkgrun::cli::commands::clean(args, &config, &root).await?,
        Commands::Config(args) => {
            pkgrun::cli::commands::config(args, &config, &config_manager).await?
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` wins when set; otherwise 0 = warn, 1 = info, 2+ = debug.
/// Logs go to stderr.
fn init_logging(verbose: u8, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "pkgrun=warn",
            1 => "pkgrun=info",
            _ => "pkgrun=debug",
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

/// Codes outside 0..=255 become a generic failure
fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
