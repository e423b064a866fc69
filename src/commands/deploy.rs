use std::path::PathBuf;

use anyhow::{Context, Result};

use uploadfiles::application::deploy::PlainDeployer;
use uploadfiles::infrastructure::TransportRegistry;

pub fn cmd_deploy(
    config_path: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    offline: bool,
    layout: Option<String>,
    json: bool,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let settings = super::load_settings(settings_path.as_deref())?;

    let artifact = config
        .artifact
        .context("no [artifact] section in the project configuration")?;
    let source = artifact
        .file
        .clone()
        .with_context(|| format!("artifact {} has no file", artifact))?;
    let repo_config = config
        .repository
        .context("no [repository] section in the project configuration")?;

    let layout_id = layout.unwrap_or(config.deploy.layout);
    let online = config.deploy.online && !offline;

    let deployer =
        PlainDeployer::with_layout_id(TransportRegistry::with_defaults(), settings, &layout_id)?;
    let report = deployer.deploy(&source, &artifact, &repo_config, online)?;

    if json {
        super::emit_json(&report)?;
    } else {
        println!(
            "Deployed {} to {}{}",
            report.artifact, report.repository_url, report.path
        );
    }
    Ok(())
}
