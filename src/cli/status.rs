//! Quick status overview command.

use crate::cli::output;
use crate::core::domain::GlobalKey;
use crate::core::merge::{self, WorkspaceStatus};
use crate::core::options::RunOptions;
use crate::core::snapshot::Snapshot;
use crate::core::state;
use crate::error::Result;

/// Show what the last prep run left for the collection runner.
pub fn execute(options: &RunOptions) -> Result<()> {
    let path = options.globals_path();
    let Some(globals) = Snapshot::load_optional(&path)? else {
        output::warn(&format!(
            "no working globals at {}",
            output::path(&path.display().to_string())
        ));
        output::hint(&format!("prepare them with {}", output::cmd("restnest-sync")));
        return Ok(());
    };
    let run_state = state::load(options)?;

    output::section("RESTNEST Sync Status");

    let bound = |key: GlobalKey| {
        globals
            .binding(key.as_str())
            .and_then(|b| b.bound().map(str::to_string))
    };

    output::kv(
        "repository",
        bound(GlobalKey::GitRepoName).unwrap_or_else(|| "-".to_string()),
    );
    output::kv(
        "task",
        bound(GlobalKey::GitFeatureTask).unwrap_or_else(|| "-".to_string()),
    );

    let role = match (
        bound(GlobalKey::PostmanApiKeyAdmin),
        bound(GlobalKey::PostmanApiKeyDeveloper),
    ) {
        (Some(admin), Some(developer)) if admin == developer => "admin",
        (Some(_), Some(_)) => "developer",
        _ => "unresolved",
    };
    output::kv("role", role);
    output::kv("last run", run_state.label());

    let workspace = match merge::workspace_status(&globals) {
        Ok(WorkspaceStatus::New { name }) => format!("new ({})", name),
        Ok(WorkspaceStatus::Existing { name }) => format!("existing ({})", name),
        Err(_) => "missing repo_workspace_name / repo_workspace_id".to_string(),
    };
    output::kv("workspace", workspace);
    output::kv("globals", output::path(&path.display().to_string()));

    output::blank();
    if role == "unresolved" {
        output::hint(&format!(
            "credentials incomplete, re-run {}",
            output::cmd("restnest-sync")
        ));
    }

    Ok(())
}
