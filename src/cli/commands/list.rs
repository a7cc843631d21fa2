//! List command - show installed packages

use crate::cache::{CacheRoot, FileCheckStore, InstalledPackage, Inventory, UpdateCheckStore};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::ui::{self, UiContext};
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

/// Freshness of an installed package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Pinned to a version, never rechecked
    Pinned,
    /// Tracking latest, checked within the interval
    Fresh,
    /// Tracking latest, due for a check
    Stale,
}

impl Freshness {
    /// Classify an installed package against the configured interval
    pub fn of(
        installed: &InstalledPackage,
        checks: &dyn UpdateCheckStore,
        config: &Config,
    ) -> Self {
        if installed.package.is_pinned() {
            return Self::Pinned;
        }
        match config.cache.update_check_interval() {
            Some(interval) if installed.package.should_check_for_updates(checks, interval) => {
                Self::Stale
            }
            _ => Self::Fresh,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pinned => "pinned",
            Self::Fresh => "fresh",
            Self::Stale => "stale",
        }
    }
}

#[derive(Serialize)]
struct PackageRow<'a> {
    package: String,
    version: &'a str,
    folder: String,
    path: String,
    status: Freshness,
    last_checked: Option<DateTime<Utc>>,
    modified: Option<DateTime<Utc>>,
}

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config, root: &CacheRoot) -> PkgrunResult<()> {
    let installed = Inventory::scan(root)?;
    let checks = FileCheckStore::open(root)?;

    if installed.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No packages installed");
            }
        }
        return Ok(());
    }

    let rows: Vec<PackageRow<'_>> = installed
        .iter()
        .map(|i| PackageRow {
            package: i.package.to_string(),
            version: i.package.version_name(),
            folder: i.package.folder(),
            path: i.path.display().to_string(),
            status: Freshness::of(i, &checks, config),
            last_checked: checks.last_checked(&i.package),
            modified: i.modified,
        })
        .collect();

    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Plain => print_plain(&rows),
    }

    Ok(())
}

fn print_table(rows: &[PackageRow<'_>]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Installed packages");

    println!(
        "{:<40} {:<12} {:<8} {:<17}",
        style("PACKAGE").bold(),
        style("VERSION").bold(),
        style("STATUS").bold(),
        style("LAST CHECKED").bold()
    );
    println!("{}", "-".repeat(80));

    for row in rows {
        let status = match row.status {
            Freshness::Pinned => style(row.status.as_str()).dim(),
            Freshness::Fresh => style(row.status.as_str()).green(),
            Freshness::Stale => style(row.status.as_str()).yellow(),
        };
        let checked = row
            .last_checked
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "{:<40} {:<12} {:<8} {:<17}",
            row.package, row.version, status, checked
        );
    }

    println!();
    println!("{} package(s)", rows.len());
}

fn print_json(rows: &[PackageRow<'_>]) -> PkgrunResult<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

fn print_plain(rows: &[PackageRow<'_>]) {
    for row in rows {
        println!("{}", row.folder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCheckStore;
    use crate::package::Package;
    use std::path::PathBuf;

    fn installed(reference: &str) -> InstalledPackage {
        InstalledPackage {
            package: Package::parse(reference).unwrap(),
            path: PathBuf::from("/cache"),
            modified: None,
        }
    }

    #[test]
    fn freshness_classification() {
        let checks = MemoryCheckStore::new();
        let mut config = Config::default();

        assert_eq!(
            Freshness::of(&installed("acme/tool@1.0"), &checks, &config),
            Freshness::Pinned
        );
        assert_eq!(
            Freshness::of(&installed("acme/tool"), &checks, &config),
            Freshness::Stale
        );

        checks
            .record_check(&installed("acme/tool").package, Utc::now())
            .unwrap();
        assert_eq!(
            Freshness::of(&installed("acme/tool"), &checks, &config),
            Freshness::Fresh
        );

        config.cache.update_check_hours = 0;
        assert_eq!(
            Freshness::of(&installed("acme/other"), &checks, &config),
            Freshness::Fresh
        );
    }

    #[test]
    fn freshness_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Freshness::Stale).unwrap(), "\"stale\"");
    }
}
