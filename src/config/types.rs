//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    Artifact, AuthenticationInfo, PermissionChange, ProxyInfo, DEFAULT_CHMOD_MODE,
    DEFAULT_CHMOD_OPTIONS,
};
use crate::error::UploadResult;

use super::loader::{self, ConfigWarning};

/// Project configuration (`uploadfiles.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upload: UploadConfig,

    /// Destination repository
    #[serde(default)]
    pub repository: Option<RepositoryConfig>,

    /// Build artifact, used as the fallback source
    #[serde(default)]
    pub artifact: Option<Artifact>,

    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// File or directory to upload (defaults to the artifact file)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Destination relative to the repository root (defaults to the source's name)
    #[serde(default)]
    pub target_path: Option<String>,

    #[serde(default = "default_true")]
    pub chmod: bool,

    #[serde(default = "default_chmod_mode")]
    pub chmod_mode: String,

    #[serde(default = "default_chmod_options")]
    pub chmod_options: String,

    #[serde(default)]
    pub skip: bool,

    /// Commands run after connecting, before the transfer
    #[serde(default)]
    pub pre_commands: Vec<String>,

    #[serde(default)]
    pub fail_on_pre_command_errors: bool,

    /// Commands run after the transfer, before chmod
    #[serde(default)]
    pub post_commands: Vec<String>,

    #[serde(default)]
    pub fail_on_post_command_errors: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            path: None,
            target_path: None,
            chmod: true,
            chmod_mode: default_chmod_mode(),
            chmod_options: default_chmod_options(),
            skip: false,
            pre_commands: Vec::new(),
            fail_on_pre_command_errors: false,
            post_commands: Vec::new(),
            fail_on_post_command_errors: false,
        }
    }
}

impl UploadConfig {
    pub fn permission_change(&self) -> PermissionChange {
        PermissionChange {
            enabled: self.chmod,
            options: self.chmod_options.clone(),
            mode: self.chmod_mode.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_chmod_mode() -> String {
    DEFAULT_CHMOD_MODE.to_string()
}

fn default_chmod_options() -> String {
    DEFAULT_CHMOD_OPTIONS.to_string()
}

/// Destination repository descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub authentication: Option<AuthenticationInfo>,
    #[serde(default)]
    pub proxy: Option<ProxyInfo>,
}

/// Plain deployer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Repository layout id (`default` or `p2`)
    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default = "default_true")]
    pub online: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            online: true,
        }
    }
}

fn default_layout() -> String {
    "default".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> UploadResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> UploadResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (UPLOADFILES_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}

/// User settings (`~/.config/uploadfiles/settings.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub servers: Vec<ServerSettings>,
}

/// Credentials and transport configuration for one repository id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    /// Free-form table bound onto the transport
    #[serde(default)]
    pub configuration: Option<toml::Table>,
}

impl ServerSettings {
    /// Credentials of this server, if any are set
    pub fn authentication(&self) -> Option<AuthenticationInfo> {
        let auth = AuthenticationInfo {
            username: self.username.clone(),
            password: self.password.clone(),
            passphrase: self.passphrase.clone(),
            private_key: self.private_key.clone(),
        };
        (!auth.is_empty()).then_some(auth)
    }
}

impl Settings {
    /// Load user settings; a missing file yields empty settings
    pub fn load_with_warnings(path: &Path) -> UploadResult<(Self, Vec<ConfigWarning>)> {
        loader::load_settings_with_warnings(path)
    }

    /// Server entry for `id`
    pub fn server(&self, id: &str) -> Option<&ServerSettings> {
        self.servers.iter().find(|server| server.id == id)
    }
}
