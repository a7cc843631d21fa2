//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{PkgrunError, PkgrunResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> PkgrunResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> PkgrunResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> PkgrunResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> PkgrunResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    if let Err(e) = apply_value(&mut config, key, value) {
        ui::remark(&ctx, &format!("Valid keys: {}", VALID_KEYS.join(", ")));
        return Err(e);
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "cache.root",
    "cache.update_check_hours",
    "installer.program",
    "installer.install_args",
    "installer.update_args",
    "runner.bin_dir",
];

/// Apply a dot-separated key to the configuration
fn apply_value(config: &mut Config, key: &str, value: &str) -> PkgrunResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(PkgrunError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )))
            }
        },

        ["cache", "root"] => {
            config.cache.root = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            }
        }
        ["cache", "update_check_hours"] => config.cache.update_check_hours = parse_u32(value)?,

        ["installer", "program"] => config.installer.program = value.to_string(),
        ["installer", "install_args"] => config.installer.install_args = parse_list(value),
        ["installer", "update_args"] => config.installer.update_args = parse_list(value),

        ["runner", "bin_dir"] => config.runner.bin_dir = value.to_string(),

        _ => return Err(PkgrunError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_u32(value: &str) -> PkgrunResult<u32> {
    value
        .parse()
        .map_err(|_| PkgrunError::User(format!("Invalid number: {}", value)))
}

/// Whitespace-separated argument list
fn parse_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
