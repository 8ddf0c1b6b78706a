//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Deploy the LuteForMobile web app into an existing Lute installation
#[derive(Parser)]
#[command(
    name = "lute-pwa-setup",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Directory to run from (default: current directory)
    #[arg(long, global = true, env = "LUTE_PWA_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Deploy options used when no subcommand is given
    #[command(flatten)]
    pub deploy: commands::deploy::DeployArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy the web app into the detected Lute installation (default)
    Deploy(commands::deploy::DeployArgs),

    /// Show which Lute installation would be used
    Detect,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            base_dir,
            json,
            quiet,
            no_color,
            deploy,
            command,
            ..
        } = self;

        if let Some(Command::Version) = command {
            commands::version::run(json);
            return Ok(());
        }

        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            json,
            base_dir,
        })?;

        match command.unwrap_or(Command::Deploy(deploy)) {
            Command::Deploy(args) => commands::deploy::run(&app, &args).await,
            Command::Detect => commands::detect::run(&app).await,
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
        }
    }
}
