//! # PabloBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! Shared helpers for the integration test files. Every command is run with
//! `--config` pointing at a file inside a temporary directory, so user and
//! project configuration on the test machine cannot leak into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Isolated working directory with its own (initially empty) config file.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_config("")
    }

    pub fn with_config(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("pablobot.toml"), content).expect("Failed to write config");
        Self { dir }
    }

    /// Writes `content` to `name` inside the sandbox and returns its path as a string.
    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write sandbox file");
        path.to_string_lossy().to_string()
    }

    /// `pablobot` running inside the sandbox with its config file.
    pub fn cmd(&self) -> Command {
        let mut cmd = pablobot_cmd();
        cmd.current_dir(self.dir.path())
            .arg("--config")
            .arg(self.dir.path().join("pablobot.toml"));
        cmd
    }
}

/// `assert_cmd::Command` for the compiled `pablobot` binary.
pub fn pablobot_cmd() -> Command {
    Command::cargo_bin("pablobot").expect("Failed to find pablobot binary for testing")
}
