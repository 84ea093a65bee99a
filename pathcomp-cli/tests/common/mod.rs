//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builders isolated from the host's `PATHCOMP_*` settings
//! - Directory trees worth compressing

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Overrides the host might have set that would leak into a test run.
const PATHCOMP_VARS: &[&str] = &[
    "PATHCOMP_DATA_DIR",
    "PATHCOMP_VARIABLE",
    "PATHCOMP_THRESHOLD",
    "PATHCOMP_WORK_DIR",
    "PATHCOMP_LIST_DELIMITER",
    "PATHCOMP_DIR_SEPARATOR",
    "PATHCOMP_LINK_ROOTS",
    "PATHCOMP_CLEANUP",
    "PATHCOMP_LOG_MODE",
];

/// A long install directory name; aliasing it always pays off.
pub const VENDOR_DIR: &str = "a-very-long-vendor-installation-directory-name-for-testing";

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the pathcomp data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created;
    /// pathcomp creates what it needs.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("pathcomp-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with every `PATHCOMP_*` variable removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathcomp").expect("Failed to find pathcomp binary");
        for var in PATHCOMP_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The binary with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Alias and backup directory under the default layout.
    pub fn work_dir(&self) -> PathBuf {
        self.data_dir.join("links")
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create `count` leaf directories under one long vendor directory and
    /// return them joined as a unix-style value.
    pub fn vendor_value(&self, count: usize) -> String {
        (0..count)
            .map(|i| {
                self.create_dir(&format!("tools/{VENDOR_DIR}/component{i}"))
                    .to_str()
                    .expect("temp path is UTF-8")
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Write a configuration file in the data directory.
    pub fn write_user_config(&self, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), content)
            .expect("Failed to write config");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
