//! Configuration module for uploadfiles
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (UPLOADFILES_*)
//! 3. Project config (uploadfiles.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! Credentials and per-server transport configuration live separately in the
//! user settings file (`~/.config/uploadfiles/settings.toml`).

mod loader;
mod types;

pub use loader::{
    default_settings_path, load_or_default, with_env_overrides, ConfigWarning,
    PROJECT_CONFIG_FILE,
};
pub use types::{Config, DeployConfig, RepositoryConfig, ServerSettings, Settings, UploadConfig};
