//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prep;
pub mod prompt;
pub mod status;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Config;
use crate::core::options::{Overrides, RunOptions, SecretSource};

/// restnest-sync - Prepares Postman globals for syncing a RESTNEST repository
/// with its Postman workspace.
#[derive(Parser)]
#[command(
    name = "restnest-sync",
    about = "Prepares Postman globals for syncing a RESTNEST repository with its Postman workspace",
    version,
    after_help = "Without a subcommand, prepares the working globals for the next collection run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub prep: PrepArgs,

    /// Directory holding the globals and secrets files
    #[arg(long, global = true, env = "RESTNEST_ENVIRONMENT_DIR")]
    pub environment_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Flags of the default prep run.
#[derive(Args, Debug, Default)]
pub struct PrepArgs {
    /// Cloud Key Secret Manager scope, e.g. GCP project id or Azure KeyVault
    #[arg(
        short = 'c',
        long = "cloudSecretId",
        visible_alias = "cloud-secret-id",
        env = "RESTNEST_CLOUD_SECRET_ID"
    )]
    pub cloud_secret_id: Option<String>,

    /// Feature used instead of the current branch, e.g. 123456/bla-bla or refresh/main
    #[arg(
        short = 'g',
        long = "gitFeatureOverride",
        visible_alias = "git-feature-override",
        env = "RESTNEST_GIT_FEATURE"
    )]
    pub git_feature_override: Option<String>,

    /// Where to read the admin Postman API key from
    #[arg(long, value_enum, env = "RESTNEST_SECRETS")]
    pub secrets: Option<SecretSource>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show what the last run prepared
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    match cli.command {
        Some(Command::Completions { shell }) => completions::execute(shell),
        Some(Command::Status) => status::execute(&run_options(cli.environment_dir, cli.prep)?),
        None => prep::execute(&run_options(cli.environment_dir, cli.prep)?),
    }
}

/// Merge `restnest.toml` with the command-line flags.
fn run_options(
    environment_dir: Option<PathBuf>,
    prep: PrepArgs,
) -> crate::error::Result<RunOptions> {
    Ok(RunOptions::new(
        Config::load()?,
        Overrides {
            environments: environment_dir,
            secret_source: prep.secrets,
            cloud_secret_id: prep.cloud_secret_id,
            feature_override: prep.git_feature_override,
        },
    ))
}
