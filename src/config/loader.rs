//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{UploadError, UploadResult};

use super::types::{Config, Settings};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "uploadfiles.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

fn parse_with_warnings<T: DeserializeOwned>(
    path: &Path,
    content: &str,
) -> UploadResult<(T, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let value: T = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| UploadError::configuration(format!("{}: {}", path.display(), e)))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((value, warnings))
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> UploadResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

/// Load user settings; a missing file is not an error
pub fn load_settings_with_warnings(path: &Path) -> UploadResult<(Settings, Vec<ConfigWarning>)> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no user settings file");
        return Ok((Settings::default(), Vec::new()));
    }
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

/// Load `uploadfiles.toml` from `project_root`, or defaults, with env overrides
pub fn load_or_default(project_root: &Path) -> UploadResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    let (config, warnings) = if project_config.exists() {
        load_with_warnings(&project_config)?
    } else {
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Default location of the user settings file
///
/// `UPLOADFILES_SETTINGS` wins over `<config dir>/uploadfiles/settings.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("UPLOADFILES_SETTINGS") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("uploadfiles").join("settings.toml"))
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|val| val.to_lowercase() != "false" && val != "0")
}

/// Apply environment variable overrides (UPLOADFILES_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Some(skip) = env_flag("UPLOADFILES_SKIP") {
        config.upload.skip = skip;
    }

    if let Some(chmod) = env_flag("UPLOADFILES_CHMOD") {
        config.upload.chmod = chmod;
    }

    if let Ok(mode) = std::env::var("UPLOADFILES_CHMOD_MODE") {
        config.upload.chmod_mode = mode;
    }

    if let Ok(options) = std::env::var("UPLOADFILES_CHMOD_OPTIONS") {
        config.upload.chmod_options = options;
    }

    if let Some(fail) = env_flag("UPLOADFILES_FAIL_ON_PRE_COMMAND_ERRORS") {
        config.upload.fail_on_pre_command_errors = fail;
    }

    if let Some(fail) = env_flag("UPLOADFILES_FAIL_ON_POST_COMMAND_ERRORS") {
        config.upload.fail_on_post_command_errors = fail;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "upload",
        "path",
        "target_path",
        "chmod",
        "chmod_mode",
        "chmod_options",
        "skip",
        "pre_commands",
        "fail_on_pre_command_errors",
        "post_commands",
        "fail_on_post_command_errors",
        "repository",
        "id",
        "url",
        "authentication",
        "proxy",
        "artifact",
        "group_id",
        "artifact_id",
        "version",
        "classifier",
        "extension",
        "file",
        "deploy",
        "layout",
        "online",
        "servers",
        "username",
        "password",
        "passphrase",
        "private_key",
        "configuration",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
