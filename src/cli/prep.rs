//! Prep command.
//!
//! Prepares the working globals for the next collection run.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::cloud::Gcloud;
use crate::core::git::SystemGit;
use crate::core::options::RunOptions;
use crate::core::prep::{self, Capabilities};
use crate::core::secrets::FileSecretStore;
use crate::error::Result;

/// Prepare globals for the repository in the current directory.
pub fn execute(options: &RunOptions) -> Result<()> {
    info!(environments = %options.environments().display(), "preparing globals");

    let git = SystemGit::new(std::env::current_dir()?);
    let store = FileSecretStore::new(options);
    let caps = Capabilities {
        git: &git,
        store: &store,
        cloud: &Gcloud,
        prompt: &TerminalPrompt,
    };

    let outcome = prep::run(options, &caps)?;

    output::success(&outcome.workspace.to_string());
    output::kv("repository", outcome.context.repository());
    output::kv("task", outcome.context.task());
    output::kv("role", outcome.role);
    output::kv("globals", output::path(&options.globals_path().display().to_string()));

    Ok(())
}
