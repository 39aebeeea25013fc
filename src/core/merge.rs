//! Configuration merging.
//!
//! Fills the recognized globals keys of a fresh template copy from the run
//! context and credentials, and classifies whether the persisted result syncs
//! an existing Postman workspace or prepares a new one.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::core::config::Naming;
use crate::core::constants;
use crate::core::domain::{Binding, CredentialSet, GlobalKey, RunContext};
use crate::core::snapshot::Snapshot;
use crate::error::{Result, WorkspaceError};

/// Everything a merge reads.
pub struct MergeInput<'a> {
    pub context: &'a RunContext,
    pub credentials: &'a CredentialSet,
    pub cloud_secret_id: Option<&'a str>,
    /// Working globals of the previous run, if any
    pub prior: Option<&'a Snapshot>,
    pub naming: &'a Naming,
}

/// Workspace binding of a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceStatus {
    /// Name or id is still a placeholder; the runner creates the workspace
    New { name: String },
    /// Name and id are bound; the runner syncs from the workspace
    Existing { name: String },
}

impl WorkspaceStatus {
    pub fn name(&self) -> &str {
        match self {
            Self::New { name } | Self::Existing { name } => name,
        }
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New { name } => write!(
                f,
                "prepared for OpenAPI workspace sync with new repo {}",
                name
            ),
            Self::Existing { name } => {
                write!(f, "prepared for sync from Postman repo workspace {}", name)
            }
        }
    }
}

/// Workspace name for a repository: the repository prefix swapped for the
/// workspace prefix, e.g. `restnest-openapi-billing` → `restnest-postman-billing`.
///
/// # Errors
///
/// Returns `WorkspaceError::Naming` unless the result has exactly three
/// `-` separated segments.
pub fn workspace_name(repository: &str, naming: &Naming) -> Result<String> {
    let name = repository.replacen(&naming.repository_prefix, &naming.workspace_prefix, 1);
    if name.split('-').count() != constants::WORKSPACE_SEGMENTS {
        return Err(WorkspaceError::Naming { name }.into());
    }
    Ok(name)
}

/// Set every recognized key present in `snapshot`.
///
/// Keys missing from the template are not added. A bound
/// `repo_workspace_name` is never replaced.
///
/// # Errors
///
/// Returns `WorkspaceError::Naming` if the template has a
/// `repo_workspace_name` entry and the derived name is malformed. The
/// snapshot must not be persisted in that case.
pub fn fill(snapshot: &mut Snapshot, input: &MergeInput<'_>) -> Result<()> {
    let derived = if snapshot.contains(GlobalKey::WorkspaceName.as_str()) {
        Some(workspace_name(input.context.repository(), input.naming)?)
    } else {
        None
    };

    carry_over_binding(snapshot, input);

    let credentials = input.credentials;
    for entry in snapshot.entries_mut() {
        let Some(key) = GlobalKey::parse(&entry.key) else {
            continue;
        };

        let value = match key {
            GlobalKey::CloudSecretsId => input.cloud_secret_id.unwrap_or_default(),
            GlobalKey::PostmanApiKey => credentials.active_key(),
            GlobalKey::PostmanApiKeyAdmin => credentials.admin_key(),
            GlobalKey::PostmanApiKeyDeveloper => credentials.developer_key(),
            GlobalKey::GitRepoName => input.context.repository(),
            GlobalKey::GitFeatureTask => input.context.task().as_str(),
            GlobalKey::WorkspaceName => match (&derived, Binding::from_value(&entry.value)) {
                (Some(name), Some(Binding::Placeholder(_))) => name.as_str(),
                _ => continue,
            },
        };
        entry.value = value.to_string();
    }

    debug!(role = %credentials.role(), "globals filled");
    Ok(())
}

/// Keep a workspace binding made after the previous run.
///
/// The collection runner binds `repo_workspace_name`/`repo_workspace_id` in
/// the working globals once the workspace exists. A fresh template copy only
/// has placeholders, so bound values of the same repository are copied back.
fn carry_over_binding(snapshot: &mut Snapshot, input: &MergeInput<'_>) {
    let Some(prior) = input.prior else {
        return;
    };
    if prior.get(GlobalKey::GitRepoName.as_str()) != Some(input.context.repository()) {
        return;
    }

    for key in [GlobalKey::WorkspaceName.as_str(), constants::WORKSPACE_ID_KEY] {
        let unbound = snapshot
            .binding(key)
            .map(|b| b.is_placeholder())
            .unwrap_or(false);
        if !unbound {
            continue;
        }
        if let Some(Binding::Bound(value)) = prior.binding(key) {
            debug!(key = %key, "keeping workspace binding from previous run");
            snapshot.set(key, &value);
        }
    }
}

/// Write a merged snapshot to `path` and classify its workspace binding.
///
/// # Errors
///
/// Write failures are returned before classification. A
/// `WorkspaceError::MissingBinding` means the file was written but the
/// collection runner has nothing to sync against.
pub fn persist(snapshot: &Snapshot, path: &Path) -> Result<WorkspaceStatus> {
    snapshot.save(path)?;
    let status = workspace_status(snapshot)?;
    debug!(workspace = %status.name(), "globals persisted");
    Ok(status)
}

/// Classify the workspace binding of a merged snapshot.
///
/// # Errors
///
/// Returns `WorkspaceError::MissingBinding` if `repo_workspace_name` or
/// `repo_workspace_id` is missing or empty.
pub fn workspace_status(snapshot: &Snapshot) -> Result<WorkspaceStatus> {
    let name = snapshot.binding(GlobalKey::WorkspaceName.as_str());
    let id = snapshot.binding(constants::WORKSPACE_ID_KEY);

    match (name, id) {
        (Some(name), Some(id)) => {
            let name_text = name.as_str().to_string();
            if name.is_placeholder() || id.is_placeholder() {
                Ok(WorkspaceStatus::New { name: name_text })
            } else {
                Ok(WorkspaceStatus::Existing { name: name_text })
            }
        }
        _ => Err(WorkspaceError::MissingBinding.into()),
    }
}
