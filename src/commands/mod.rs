//! CLI command handlers

pub mod deploy;
pub mod layout;
pub mod protocols;
pub mod upload;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use uploadfiles::config::{self, Config, ConfigWarning, Settings};

/// Write one JSON document to stdout
pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Project config from `path`, or `./uploadfiles.toml` when present
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (config, warnings) = match path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            (config.with_env_overrides(), warnings)
        }
        None => config::load_or_default(Path::new("."))?,
    };
    report_warnings(&warnings);
    Ok(config)
}

/// User settings from `path`, else the default location
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path.map(Path::to_path_buf).or_else(config::default_settings_path) else {
        return Ok(Settings::default());
    };
    let (settings, warnings) = Settings::load_with_warnings(&path)?;
    report_warnings(&warnings);
    Ok(settings)
}

fn report_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
}
