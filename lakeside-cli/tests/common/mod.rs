//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Fixtures for rooms and reservations

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the lakeside data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; lakeside creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("lakeside-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak settings from the developer's
    /// shell are cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("lakeside").expect("Failed to find lakeside binary");
        for var in [
            "LAKESIDE_DATA_DIR",
            "LAKESIDE_DISABLE_AUTOINIT",
            "LAKESIDE_LOCK_TIMEOUT_MS",
            "LAKESIDE_CONFIRMATION_ATTEMPTS",
            "LAKESIDE_TURNOVER",
            "LAKESIDE_MAXIMUM_LOCK_WAIT_SECONDS",
            "LAKESIDE_OUTPUT_FORMAT",
            "LAKESIDE_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Add a room and return its id.
    ///
    /// # Panics
    /// Panics if the command fails or doesn't print an id.
    pub fn add_room(&self, room_type: &str, price: &str) -> i64 {
        let output = self
            .command()
            .args(["add-room", "--type", room_type, "--price", price])
            .output()
            .expect("Failed to run add-room command");

        assert!(
            output.status.success(),
            "add-room failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&String::from_utf8_lossy(&output.stdout))
    }

    /// Reserve a room for one guest and return the confirmation code.
    ///
    /// # Panics
    /// Panics if the reservation is refused.
    pub fn reserve(&self, room: i64, check_in: &str, check_out: &str, email: &str) -> String {
        let output = self
            .reserve_command(room, check_in, check_out, email)
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// A `reserve` invocation ready to run.
    pub fn reserve_command(&self, room: i64, check_in: &str, check_out: &str, email: &str) -> Command {
        let mut cmd = self.command();
        cmd.args([
            "reserve",
            "--room",
            &room.to_string(),
            "--check-in",
            check_in,
            "--check-out",
            check_out,
            "--name",
            "Test Guest",
            "--email",
            email,
        ]);
        cmd
    }

    /// Run a listing command with `--format json` and parse the result.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(args)
            .args(["--format", "json"])
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an id printed on its own line.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}

/// Check that `code` looks like a confirmation code.
#[allow(dead_code)]
pub fn is_confirmation_code(code: &str) -> bool {
    code.len() == 10 && code.bytes().all(|b| b.is_ascii_digit())
}
