//! Upload Options
//!
//! Configuration types for upload operations.

use std::path::{Path, PathBuf};

use crate::config::UploadConfig;
use crate::domain::services::resolve_target_path;
use crate::domain::value_objects::{
    Artifact, AuthenticationInfo, PermissionChange, ProxyInfo, RemoteCommand, Repository,
};
use crate::error::{UploadError, UploadResult};

/// Options for the upload use case
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// File or directory to upload (defaults to the artifact file)
    pub path: Option<PathBuf>,
    /// Destination relative to the repository root
    pub target_path: Option<String>,
    /// Remote `chmod` after the transfer
    pub permission_change: PermissionChange,
    /// Skip the whole upload
    pub skip: bool,
    pub pre_commands: Vec<RemoteCommand>,
    pub fail_on_pre_command_errors: bool,
    pub post_commands: Vec<RemoteCommand>,
    pub fail_on_post_command_errors: bool,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_target_path(mut self, target_path: impl Into<String>) -> Self {
        self.target_path = Some(target_path.into());
        self
    }

    pub fn with_permission_change(mut self, permission_change: PermissionChange) -> Self {
        self.permission_change = permission_change;
        self
    }

    pub fn with_chmod(mut self, enabled: bool) -> Self {
        self.permission_change.enabled = enabled;
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_pre_commands<I, S>(mut self, commands: I, fail_fast: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pre_commands = commands
            .into_iter()
            .map(|c| RemoteCommand::parse(c.as_ref()))
            .collect();
        self.fail_on_pre_command_errors = fail_fast;
        self
    }

    pub fn with_post_commands<I, S>(mut self, commands: I, fail_fast: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.post_commands = commands
            .into_iter()
            .map(|c| RemoteCommand::parse(c.as_ref()))
            .collect();
        self.fail_on_post_command_errors = fail_fast;
        self
    }

    /// The configured path, else the artifact's file
    pub fn resolve_source(&self, artifact: Option<&Artifact>) -> UploadResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        artifact
            .and_then(|a| a.file.clone())
            .ok_or_else(|| {
                UploadError::configuration(
                    "no upload path configured and the build produced no artifact file",
                )
            })
    }

    /// The configured target path, completed with the source's name when needed
    pub fn resolve_target_path(&self, source: &Path) -> String {
        resolve_target_path(self.target_path.as_deref(), source)
    }
}

impl From<&UploadConfig> for UploadOptions {
    fn from(config: &UploadConfig) -> Self {
        let options = Self {
            path: config.path.clone(),
            target_path: config.target_path.clone(),
            permission_change: config.permission_change(),
            skip: config.skip,
            ..Self::default()
        };
        options
            .with_pre_commands(&config.pre_commands, config.fail_on_pre_command_errors)
            .with_post_commands(&config.post_commands, config.fail_on_post_command_errors)
    }
}

/// Everything needed to run one upload session
///
/// Built once before connecting and not changed afterwards.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub source: PathBuf,
    pub repository: Repository,
    pub target_path: String,
    pub authentication: Option<AuthenticationInfo>,
    pub proxy: Option<ProxyInfo>,
}
