use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// uploadfiles - upload build output to a remote repository
#[derive(Parser, Debug)]
#[command(name = "uploadfiles")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file or directory to the configured repository
    Upload {
        /// Project config file (defaults to ./uploadfiles.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// User settings file with server credentials
        #[arg(long)]
        settings: Option<PathBuf>,

        /// File or directory to upload
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Destination relative to the repository root
        #[arg(short, long)]
        target_path: Option<String>,

        /// Skip the upload
        #[arg(long)]
        skip: bool,

        /// Don't change remote permissions after the transfer
        #[arg(long)]
        no_chmod: bool,

        /// Mode passed to chmod
        #[arg(long)]
        chmod_mode: Option<String>,

        /// Options passed to chmod
        #[arg(long, allow_hyphen_values = true)]
        chmod_options: Option<String>,

        /// Command to run before the transfer (repeatable, '@' ignores failure)
        #[arg(long = "pre-command")]
        pre_commands: Vec<String>,

        /// Command to run after the transfer (repeatable, '@' ignores failure)
        #[arg(long = "post-command")]
        post_commands: Vec<String>,

        /// Abort when a pre-command fails
        #[arg(long)]
        fail_on_pre_command_errors: bool,

        /// Abort when a post-command fails
        #[arg(long)]
        fail_on_post_command_errors: bool,
    },

    /// Deploy the configured artifact at its repository layout path
    Deploy {
        /// Project config file (defaults to ./uploadfiles.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// User settings file with server credentials
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Refuse to touch the network
        #[arg(long)]
        offline: bool,

        /// Repository layout (p2 or default)
        #[arg(long)]
        layout: Option<String>,
    },

    /// Print the repository path of an artifact
    Layout {
        #[arg(long)]
        group_id: String,

        #[arg(long)]
        artifact_id: String,

        #[arg(long)]
        version: String,

        #[arg(long)]
        classifier: Option<String>,

        #[arg(long, default_value = "jar")]
        extension: String,

        /// Repository layout (p2 or default)
        #[arg(long, default_value = "p2")]
        layout: String,
    },

    /// List the supported transport protocols
    Protocols,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_upload_flags() {
        let cli = Cli::try_parse_from([
            "uploadfiles",
            "upload",
            "--path",
            "target/site",
            "--pre-command",
            "@rm -rf old",
            "--pre-command",
            "mkdir new",
            "--no-chmod",
            "--fail-on-pre-command-errors",
        ])
        .unwrap();
        if let Commands::Upload {
            path,
            pre_commands,
            no_chmod,
            fail_on_pre_command_errors,
            fail_on_post_command_errors,
            ..
        } = cli.command
        {
            assert_eq!(path, Some(PathBuf::from("target/site")));
            assert_eq!(pre_commands, vec!["@rm -rf old", "mkdir new"]);
            assert!(no_chmod);
            assert!(fail_on_pre_command_errors);
            assert!(!fail_on_post_command_errors);
        } else {
            panic!("Expected Upload command");
        }
    }

    #[test]
    fn test_cli_chmod_options_accept_leading_dash() {
        let cli =
            Cli::try_parse_from(["uploadfiles", "upload", "--chmod-options", "-R"]).unwrap();
        if let Commands::Upload { chmod_options, .. } = cli.command {
            assert_eq!(chmod_options.as_deref(), Some("-R"));
        } else {
            panic!("Expected Upload command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["uploadfiles", "protocols", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_parse_layout_defaults() {
        let cli = Cli::try_parse_from([
            "uploadfiles",
            "layout",
            "--group-id",
            "g",
            "--artifact-id",
            "a",
            "--version",
            "1",
        ])
        .unwrap();
        if let Commands::Layout {
            extension, layout, ..
        } = cli.command
        {
            assert_eq!(extension, "jar");
            assert_eq!(layout, "p2");
        } else {
            panic!("Expected Layout command");
        }
    }

    #[test]
    fn test_cli_parse_deploy_offline() {
        let cli = Cli::try_parse_from(["uploadfiles", "deploy", "--offline"]).unwrap();
        if let Commands::Deploy {
            offline, layout, ..
        } = cli.command
        {
            assert!(offline);
            assert!(layout.is_none());
        } else {
            panic!("Expected Deploy command");
        }
    }
}
