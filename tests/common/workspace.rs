//! Isolated directories for running the binary
//!
//! Each workspace points the config and data directories at a temporary
//! directory so tests never read or write the real user configuration.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The TempDir must be kept alive for the duration of the test to prevent
/// cleanup.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_file(&self) -> PathBuf {
        self.path.join("data").join("serenity.json")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.path.join("exports")
    }

    /// The binary with config, data and exports inside this workspace
    pub fn serenity(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("serenity")?;
        cmd.current_dir(&self.path)
            .env("XDG_CONFIG_HOME", self.path.join("config"))
            .env("XDG_DATA_HOME", self.path.join("share"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(self.data_file())
            .arg("--export-dir")
            .arg(self.export_dir());
        Ok(cmd)
    }

    /// Run `serenity exec <line>`
    pub fn exec(&self, line: &str) -> anyhow::Result<Command> {
        let mut cmd = self.serenity()?;
        cmd.arg("exec").args(line.split_whitespace());
        Ok(cmd)
    }
}
