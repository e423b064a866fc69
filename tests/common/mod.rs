//! Common test utilities for uploadfiles CLI and scenario tests.
//!
//! `TestEnv` gives every test an isolated project directory, a `file://`
//! repository directory and a home directory, and runs the binary inside them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated environment with a project, a repository and a home directory
pub struct TestEnv {
    pub project_root: TempDir,
    pub repository: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            repository: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// `file://` URL of the repository directory, optionally with a sub path
    pub fn repository_url(&self, sub: &str) -> String {
        let base = format!("file://{}", self.repository.path().display());
        if sub.is_empty() {
            base
        } else {
            format!("{}/{}", base, sub)
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn repository_path(&self, relative: &str) -> PathBuf {
        self.repository.path().join(relative)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home_dir.path().join("settings.toml")
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn write_settings(&self, content: &str) {
        write_file(&self.settings_path(), content);
    }

    /// Write `uploadfiles.toml` pointing at the repository directory
    pub fn write_config(&self, upload_section: &str) {
        let config = format!(
            "[upload]\n{}\n\n[repository]\nid = \"local\"\nurl = \"{}\"\n",
            upload_section,
            self.repository_url("")
        );
        self.write_project_file("uploadfiles.toml", &config);
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_uploadfiles"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("UPLOADFILES_SETTINGS", self.settings_path())
            .env_remove("UPLOADFILES_LOG")
            .env_remove("UPLOADFILES_SKIP")
            .env_remove("UPLOADFILES_CHMOD");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute uploadfiles");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
