//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pkgrun - Run versioned packages on demand
///
/// Installs a package into a private per-version cache the first time it
/// is used, refreshes packages tracking latest once a day, and runs the
/// package's command.
#[derive(Parser, Debug)]
#[command(name = "pkgrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PKGRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Package cache directory
    #[arg(long, global = true, env = "PKGRUN_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a package, installing it first if needed
    Run(RunArgs),

    /// Install a package without running it
    Install(PackageArgs),

    /// Check an installed package for a newer release
    Update(PackageArgs),

    /// List installed packages
    List(ListArgs),

    /// Show identity and cache details for a package
    Info(PackageArgs),

    /// Remove installed packages
    Clean(CleanArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Package reference: <vendor>/<package>[@<version>]
    pub package: String,

    /// Entry point to run (defaults to the package name)
    #[arg(short, long)]
    pub bin: Option<String>,

    /// Check for updates even if the last check is recent
    #[arg(long)]
    pub refresh: bool,

    /// Arguments passed to the package
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments naming a single package
#[derive(Parser, Debug)]
pub struct PackageArgs {
    /// Package reference: <vendor>/<package>[@<version>]
    pub package: String,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["packages", "all", "older_than"])))]
pub struct CleanArgs {
    /// Packages to remove
    pub packages: Vec<String>,

    /// Remove every installed package
    #[arg(long, conflicts_with = "packages")]
    pub all: bool,

    /// Remove packages not modified for N days
    #[arg(long, value_name = "DAYS", conflicts_with_all = ["packages", "all"])]
    pub older_than: Option<u32>,

    /// Show what would be removed
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.update_check_hours)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
