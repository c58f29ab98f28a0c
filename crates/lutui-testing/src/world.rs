//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated data directory
//! - Serving a catalog through a fake `lutris` shell script
//! - Controlling what a "launched game" does
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use lutui_types::CatalogEntry;
use predicates::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// What the fake `lutris` does when asked to run a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeLaunch {
    /// Exit immediately with the given code.
    ExitWith(i32),
    /// Fork a long `sleep` grandchild, record its pid, and wait on it.
    SpawnSleeper,
}

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use lutui_testing::{FakeLaunch, TestWorld};
///
/// let world = TestWorld::new()
///     .with_games(&lutui_testing::fixtures::five_games())
///     .with_fake_lutris(FakeLaunch::ExitWith(0));
///
/// let result = world.run(&["list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    catalog_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment serving the sample listing.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".lutui");
        let catalog_path = temp_dir.path().join("catalog.json");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::write(&catalog_path, fixtures::LUTRIS_LISTING)
            .expect("Failed to write catalog");

        Self {
            temp_dir,
            data_dir,
            catalog_path,
            env_vars: HashMap::new(),
        }
    }

    /// Replace the served catalog.
    pub fn with_games(self, entries: &[CatalogEntry]) -> Self {
        std::fs::write(&self.catalog_path, fixtures::listing_json(entries))
            .expect("Failed to write catalog");
        self
    }

    /// Install the fake `lutris` executable.
    ///
    /// It answers `--list-games` from the catalog file and appends every
    /// launched id to `launches.log`.
    #[cfg(unix)]
    pub fn with_fake_lutris(self, launch: FakeLaunch) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let on_launch = match launch {
            FakeLaunch::ExitWith(code) => format!("exit {}", code),
            FakeLaunch::SpawnSleeper => format!(
                "sleep 60 &\n    echo $! > '{}'\n    wait",
                self.grandchild_pid_file().display()
            ),
        };
        let script = format!(
            "#!/bin/sh\n\
             case \"$1\" in\n\
             \x20 --list-games)\n\
             \x20   cat '{catalog}'\n\
             \x20   ;;\n\
             \x20 lutris:rungameid/*)\n\
             \x20   echo \"${{1#lutris:rungameid/}}\" >> '{log}'\n\
             \x20   {on_launch}\n\
             \x20   ;;\n\
             \x20 *)\n\
             \x20   echo \"unexpected arguments: $*\" >&2\n\
             \x20   exit 2\n\
             \x20   ;;\n\
             esac\n",
            catalog = self.catalog_path.display(),
            log = self.launch_log().display(),
            on_launch = on_launch,
        );

        let path = self.fake_lutris_path();
        std::fs::write(&path, script).expect("Failed to write fake lutris");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake lutris executable");
        self
    }

    /// Add an environment variable for executed commands.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Get the data directory path (.lutui).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn fake_lutris_path(&self) -> PathBuf {
        self.temp_dir.path().join("lutris")
    }

    pub fn launch_log(&self) -> PathBuf {
        self.temp_dir.path().join("launches.log")
    }

    pub fn grandchild_pid_file(&self) -> PathBuf {
        self.temp_dir.path().join("grandchild.pid")
    }

    /// Ids the fake `lutris` was asked to run, in order.
    pub fn launched_ids(&self) -> Vec<String> {
        std::fs::read_to_string(self.launch_log())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--lutris-path")
            .arg(self.fake_lutris_path());

        cmd.current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Same settings as [`configure_command`](Self::configure_command), for
    /// a plain `std::process::Command` (background runs).
    #[allow(deprecated)]
    pub fn std_command(&self, args: &[&str]) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("lutui"));
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--lutris-path")
            .arg(self.fake_lutris_path())
            .args(args)
            .current_dir(self.temp_dir.path());
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Execute a command using the project's binary and return the result.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("lutui")
            .map_err(|e| anyhow::anyhow!("Failed to find lutui binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout_contains(&self, needle: &str) -> bool {
        predicate::str::contains(needle).eval(self.stdout.as_str())
    }

    pub fn stderr_contains(&self, needle: &str) -> bool {
        predicate::str::contains(needle).eval(self.stderr.as_str())
    }
}
