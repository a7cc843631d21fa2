//! Builds the default installer, runner and provisioner from configuration

use crate::cache::{CacheRoot, FileCheckStore};
use crate::config::Config;
use crate::error::PkgrunResult;
use crate::orchestration::installer::CommandInstaller;
use crate::orchestration::provisioner::Provisioner;
use crate::orchestration::runner::{BinRunner, Runner};

/// Create a provisioner backed by the command installer and on-disk check records
pub fn create_provisioner(config: &Config, root: CacheRoot) -> PkgrunResult<Provisioner> {
    let checks = FileCheckStore::open(&root)?;
    let installer = CommandInstaller::new(config.installer.clone());

    Ok(Provisioner::new(
        root,
        Box::new(checks),
        Box::new(installer),
        config.cache.update_check_interval(),
    ))
}

/// Create the runner for installed packages
pub fn create_runner(config: &Config) -> Box<dyn Runner> {
    Box::new(BinRunner::new(config.runner.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn provisioner_uses_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.installer.program = "my-installer".to_string();

        let provisioner = create_provisioner(&config, CacheRoot::new(temp.path())).unwrap();

        assert_eq!(provisioner.installer_name(), "my-installer");
        assert_eq!(provisioner.root().path(), temp.path());
    }
}
