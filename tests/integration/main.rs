//! Integration tests for pkgrun

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Isolated cache root and config for one test
    struct Sandbox {
        temp: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            let sandbox = Self {
                temp: TempDir::new().unwrap(),
            };
            sandbox.write_config(&pkgrun::config::Config::default());
            sandbox
        }

        /// Installer that drops a `tool` script echoing its arguments
        #[cfg(unix)]
        fn with_fake_installer() -> Self {
            let sandbox = Self::new();
            let mut config = pkgrun::config::Config::default();
            config.installer.program = "sh".to_string();
            config.installer.install_args = vec![
                "-c".to_string(),
                "mkdir -p vendor/bin && printf '#!/bin/sh\\necho ran \"$@\"\\n' > vendor/bin/tool && chmod +x vendor/bin/tool && echo \"$0\" > installed-as".to_string(),
            ];
            config.installer.update_args = vec!["-c".to_string(), "touch updated".to_string()];
            sandbox.write_config(&config);
            sandbox
        }

        fn write_config(&self, config: &pkgrun::config::Config) {
            let content = toml::to_string_pretty(config).unwrap();
            std::fs::write(self.config_path(), content).unwrap();
        }

        fn config_path(&self) -> PathBuf {
            self.temp.path().join("config.toml")
        }

        fn cache_dir(&self) -> PathBuf {
            self.temp.path().join("cache")
        }

        fn folder(&self, folder: &str) -> PathBuf {
            self.cache_dir().join(folder)
        }

        fn cmd(&self) -> Command {
            let mut cmd = pkgrun();
            cmd.env_remove("PKGRUN_CONFIG")
                .env_remove("PKGRUN_CACHE_DIR")
                .env_remove("RUST_LOG")
                .arg("--config")
                .arg(self.config_path())
                .arg("--cache-dir")
                .arg(self.cache_dir());
            cmd
        }
    }

    fn pkgrun() -> Command {
        cargo_bin_cmd!("pkgrun")
    }

    fn make_folder(path: &Path) {
        std::fs::create_dir_all(path).unwrap();
    }

    #[test]
    fn help_displays() {
        pkgrun()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Run versioned packages on demand"));
    }

    #[test]
    fn version_displays() {
        pkgrun()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgrun"));
    }

    #[test]
    fn run_empty_reference() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["run", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("A package name must be provided."));
    }

    #[test]
    fn run_malformed_reference() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["run", "test"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "A package name should be in the format \"<vendor>/<package>",
            ))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn info_shows_folder() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["info", "test/test@1.0.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("test/test/1.0.0"))
            .stdout(predicate::str::contains("test/test:1.0.0"))
            .stdout(predicate::str::contains("Pinned versions are never checked"));
    }

    #[test]
    fn info_latest_is_due_for_check() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["info", "test/test"])
            .assert()
            .success()
            .stdout(predicate::str::contains("test/test/latest"))
            .stdout(predicate::str::contains("never"))
            .stdout(predicate::str::contains("due"));
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .env("RUST_LOG", "pkgrun=debug")
            .args(["info", "acme/tool"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Using cache root"));

        sandbox
            .cmd()
            .args(["info", "acme/tool"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Using cache root").not());
    }

    #[test]
    fn list_empty() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No packages installed"));

        sandbox
            .cmd()
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn list_plain_shows_folders() {
        let sandbox = Sandbox::new();
        make_folder(&sandbox.folder("acme/tool/latest"));
        make_folder(&sandbox.folder("acme/tool/1.0.0"));

        sandbox
            .cmd()
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout("acme/tool/1.0.0\nacme/tool/latest\n");
    }

    #[test]
    fn clean_named_package() {
        let sandbox = Sandbox::new();
        let dir = sandbox.folder("test/test/1.0.0");
        make_folder(&dir.join("vendor"));

        sandbox
            .cmd()
            .args(["clean", "test/test@1.0.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed test/test@1.0.0"));

        assert!(!dir.exists());
        assert!(!sandbox.folder("test").exists());

        // Second removal is not an error
        sandbox
            .cmd()
            .args(["clean", "test/test@1.0.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("test/test@1.0.0 is not installed"));
    }

    #[test]
    fn clean_bad_reference_removes_nothing() {
        let sandbox = Sandbox::new();
        let dir = sandbox.folder("test/test/latest");
        make_folder(&dir);

        sandbox
            .cmd()
            .args(["clean", "test/test", "broken"])
            .assert()
            .failure();

        assert!(dir.exists());
    }

    #[test]
    fn clean_all_requires_confirmation() {
        let sandbox = Sandbox::new();
        let dir = sandbox.folder("acme/tool/latest");
        make_folder(&dir);

        // Non-interactive without --yes declines
        sandbox.cmd().args(["clean", "--all"]).assert().success();
        assert!(dir.exists());

        sandbox
            .cmd()
            .args(["clean", "--all", "--yes"])
            .assert()
            .success();
        assert!(!dir.exists());
    }

    #[test]
    fn clean_dry_run() {
        let sandbox = Sandbox::new();
        let dir = sandbox.folder("acme/tool/latest");
        make_folder(&dir);

        sandbox
            .cmd()
            .args(["clean", "--all", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("acme/tool/latest"))
            .stdout(predicate::str::contains("Dry run"));
        assert!(dir.exists());
    }

    #[test]
    fn update_requires_install() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["update", "acme/tool"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not installed"));
    }

    #[test]
    fn config_path() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("update_check_hours = 24"));
    }

    #[test]
    fn config_set_unknown_key() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "set", "cache.nope", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn missing_installer() {
        let sandbox = Sandbox::new();
        let mut config = pkgrun::config::Config::default();
        config.installer.program = "pkgrun-no-such-installer".to_string();
        sandbox.write_config(&config);

        sandbox
            .cmd()
            .args(["install", "acme/tool"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Installer not found"));
        assert!(!sandbox.folder("acme/tool/latest").exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_installs_then_executes() {
        let sandbox = Sandbox::with_fake_installer();

        sandbox
            .cmd()
            .args(["run", "acme/tool@1.0", "--", "a", "b"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ran a b"))
            .stderr(predicate::str::contains("Installing acme/tool@1.0 with sh"));

        let dir = sandbox.folder("acme/tool/1.0");
        assert!(dir.join("vendor/bin/tool").exists());
        let installed_as = std::fs::read_to_string(dir.join("installed-as")).unwrap();
        assert_eq!(installed_as.trim(), "acme/tool:1.0");
    }

    #[cfg(unix)]
    #[test]
    fn run_reuses_fresh_install() {
        let sandbox = Sandbox::with_fake_installer();

        sandbox.cmd().args(["install", "acme/tool"]).assert().success();
        sandbox
            .cmd()
            .args(["run", "acme/tool"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ran"));

        // Checked moments ago, so no update ran
        assert!(!sandbox.folder("acme/tool/latest/updated").exists());

        sandbox
            .cmd()
            .args(["run", "--refresh", "acme/tool"])
            .assert()
            .success();
        assert!(sandbox.folder("acme/tool/latest/updated").exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_propagates_exit_code() {
        let sandbox = Sandbox::new();
        let mut config = pkgrun::config::Config::default();
        config.installer.program = "sh".to_string();
        config.installer.install_args = vec![
            "-c".to_string(),
            "mkdir -p vendor/bin && printf '#!/bin/sh\\nexit 3\\n' > vendor/bin/tool && chmod +x vendor/bin/tool".to_string(),
        ];
        sandbox.write_config(&config);

        sandbox
            .cmd()
            .args(["run", "acme/tool"])
            .assert()
            .code(3);
    }

    #[cfg(unix)]
    #[test]
    fn list_json_after_install() {
        let sandbox = Sandbox::with_fake_installer();
        sandbox
            .cmd()
            .args(["install", "acme/tool"])
            .assert()
            .success();

        sandbox
            .cmd()
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"folder\": \"acme/tool/latest\""))
            .stdout(predicate::str::contains("\"status\": \"fresh\""));
    }
}
