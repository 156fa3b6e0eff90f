//! Shared helpers for the tokviz test suites.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated environment for running the `tokviz` binary.
///
/// `HOME` points at a private directory so no real config file is picked up,
/// and the count cache lives in the same temporary tree.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    home_dir: PathBuf,
    cache_dir: PathBuf,
}

impl TestProject {
    /// Create a new empty environment.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let home_dir = temp_dir.path().join("home");
        let cache_dir = temp_dir.path().join("cache");

        fs::create_dir_all(&home_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            home_dir,
            cache_dir,
        })
    }

    /// Directory used as `HOME`.
    pub fn home_path(&self) -> &Path {
        &self.home_dir
    }

    /// Directory exported as `TOKVIZ_CACHE_DIR`.
    pub fn cache_path(&self) -> &Path {
        &self.cache_dir
    }

    /// Write `~/.tokviz/config.toml` and return its path.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let config_path = self.home_dir.join(".tokviz").join("config.toml");
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        Ok(config_path)
    }

    /// Number of cached counts on disk.
    pub fn cached_entries(&self) -> usize {
        fs::read_dir(&self.cache_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Run tokviz with `args`, feeding `stdin`.
    pub fn run_tokviz(&self, args: &[&str], stdin: &str) -> Result<CommandOutput> {
        self.run_tokviz_with_env(args, stdin, &[])
    }

    /// Run tokviz with extra environment variables.
    pub fn run_tokviz_with_env(
        &self,
        args: &[&str],
        stdin: &str,
        env: &[(&str, &str)],
    ) -> Result<CommandOutput> {
        let mut cmd = Command::cargo_bin("tokviz")?;
        cmd.args(args)
            .env("HOME", &self.home_dir)
            .env("TOKVIZ_CACHE_DIR", &self.cache_dir)
            .env("NO_COLOR", "1")
            .env_remove("TOKVIZ_CONFIG")
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("RUST_LOG")
            .write_stdin(stdin);
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().context("Failed to run tokviz")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Captured result of one tokviz run.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        assert_eq!(self.code, Some(1), "Stderr: {}", self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
