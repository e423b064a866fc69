//! uploadfiles CLI - upload build output to a remote repository
//!
//! Usage: uploadfiles <COMMAND>
//!
//! Commands:
//!   upload     Upload a file or directory to the configured repository
//!   deploy     Deploy the configured artifact at its layout path
//!   layout     Print the repository path of an artifact
//!   protocols  List the supported transport protocols

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::upload::UploadArgs;
use uploadfiles::domain::value_objects::Artifact;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Upload {
            config,
            settings,
            path,
            target_path,
            skip,
            no_chmod,
            chmod_mode,
            chmod_options,
            pre_commands,
            post_commands,
            fail_on_pre_command_errors,
            fail_on_post_command_errors,
        } => commands::upload::cmd_upload(
            UploadArgs {
                config,
                settings,
                path,
                target_path,
                skip,
                no_chmod,
                chmod_mode,
                chmod_options,
                pre_commands,
                post_commands,
                fail_on_pre_command_errors,
                fail_on_post_command_errors,
            },
            cli.json,
        ),
        Commands::Deploy {
            config,
            settings,
            offline,
            layout,
        } => commands::deploy::cmd_deploy(config, settings, offline, layout, cli.json),
        Commands::Layout {
            group_id,
            artifact_id,
            version,
            classifier,
            extension,
            layout,
        } => {
            let mut artifact = Artifact::new(group_id, artifact_id, version).with_extension(extension);
            if let Some(classifier) = classifier {
                artifact = artifact.with_classifier(classifier);
            }
            commands::layout::cmd_layout(&artifact, &layout, cli.json)
        }
        Commands::Protocols => commands::protocols::cmd_protocols(cli.json),
    }
}
