//! Entry point discovery and execution

use crate::config::schema::RunnerConfig;
use crate::error::{PkgrunError, PkgrunResult};
use crate::package::Package;
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Executes an installed package
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run the package installed in `dir` and return its exit code
    async fn run(
        &self,
        package: &Package,
        dir: &Path,
        bin: Option<&str>,
        args: &[String],
    ) -> PkgrunResult<i32>;
}

/// Runner that executes a file from the package's bin directory
pub struct BinRunner {
    config: RunnerConfig,
}

impl BinRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Pick the entry point inside `dir`
    ///
    /// An explicit `bin` must exist. Otherwise a file named after the
    /// package wins, then the only file present.
    pub fn resolve_entry_point(
        &self,
        package: &Package,
        dir: &Path,
        bin: Option<&str>,
    ) -> PkgrunResult<PathBuf> {
        let bin_dir = dir.join(&self.config.bin_dir);
        let candidates = list_entry_points(&bin_dir)?;

        let chosen = match bin {
            Some(bin) => candidates.iter().find(|c| c.as_str() == bin),
            None => candidates
                .iter()
                .find(|c| c.as_str() == package.name())
                .or_else(|| match candidates.as_slice() {
                    [only] => Some(only),
                    _ => None,
                }),
        }
        .cloned();

        match chosen {
            Some(name) => Ok(bin_dir.join(name)),
            None => Err(PkgrunError::EntryPointNotFound {
                package: package.to_string(),
                dir: bin_dir,
                candidates,
            }),
        }
    }
}

#[async_trait]
impl Runner for BinRunner {
    async fn run(
        &self,
        package: &Package,
        dir: &Path,
        bin: Option<&str>,
        args: &[String],
    ) -> PkgrunResult<i32> {
        let entry_point = self.resolve_entry_point(package, dir, bin)?;
        debug!("Executing {} {:?}", entry_point.display(), args);

        let status = Command::new(&entry_point)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| PkgrunError::command_failed(entry_point.display().to_string(), e))?;

        status.code().ok_or(PkgrunError::ProcessSignaled)
    }
}

/// Sorted file names in the bin directory; a missing directory is empty
fn list_entry_points(bin_dir: &Path) -> PkgrunResult<Vec<String>> {
    let entries = match fs::read_dir(bin_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(PkgrunError::io(
                format!("reading directory {}", bin_dir.display()),
                e,
            ))
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}
