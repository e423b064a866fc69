use std::path::PathBuf;

use anyhow::Result;

use uploadfiles::application::upload::{UploadOptions, UploadReport, UploadUseCase};
use uploadfiles::config::{Settings, UploadConfig};
use uploadfiles::infrastructure::TransportRegistry;

/// Flags of `uploadfiles upload`; each one set overrides the config file
#[derive(Debug, Default)]
pub struct UploadArgs {
    pub config: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub path: Option<PathBuf>,
    pub target_path: Option<String>,
    pub skip: bool,
    pub no_chmod: bool,
    pub chmod_mode: Option<String>,
    pub chmod_options: Option<String>,
    pub pre_commands: Vec<String>,
    pub post_commands: Vec<String>,
    pub fail_on_pre_command_errors: bool,
    pub fail_on_post_command_errors: bool,
}

impl UploadArgs {
    fn apply(self, mut upload: UploadConfig) -> UploadConfig {
        if self.path.is_some() {
            upload.path = self.path;
        }
        if self.target_path.is_some() {
            upload.target_path = self.target_path;
        }
        upload.skip |= self.skip;
        if self.no_chmod {
            upload.chmod = false;
        }
        if let Some(mode) = self.chmod_mode {
            upload.chmod_mode = mode;
        }
        if let Some(options) = self.chmod_options {
            upload.chmod_options = options;
        }
        if !self.pre_commands.is_empty() {
            upload.pre_commands = self.pre_commands;
        }
        if !self.post_commands.is_empty() {
            upload.post_commands = self.post_commands;
        }
        upload.fail_on_pre_command_errors |= self.fail_on_pre_command_errors;
        upload.fail_on_post_command_errors |= self.fail_on_post_command_errors;
        upload
    }
}

pub fn cmd_upload(args: UploadArgs, json: bool) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let settings_path = args.settings.clone();

    let upload = args.apply(config.upload);
    let options = UploadOptions::from(&upload);

    // A skipped upload never reads the user settings
    let settings = if options.skip {
        Settings::default()
    } else {
        super::load_settings(settings_path.as_deref())?
    };

    let use_case = UploadUseCase::new(TransportRegistry::with_defaults(), settings);
    let report = use_case.execute(
        &options,
        config.repository.as_ref(),
        config.artifact.as_ref(),
    )?;

    if json {
        super::emit_json(&report)?;
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &UploadReport) {
    if report.skipped {
        println!("Upload skipped");
        return;
    }

    let source = report
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "Uploaded {} to {}{}",
        source,
        report.repository_url.as_deref().unwrap_or_default(),
        report.target_path.as_deref().unwrap_or_default()
    );
    if report.commands_executed > 0 {
        println!(
            "Commands: {} run, {} failed",
            report.commands_executed,
            report.command_failures.len()
        );
    }
    if report.chmod_applied {
        println!("Permissions updated");
    }
}
