//! Prep run orchestration.
//!
//! One strictly sequential pass: resolve the context, resolve credentials,
//! merge into a fresh template copy, persist and classify.

use tracing::{debug, warn};

use crate::core::cloud::CloudSecrets;
use crate::core::context;
use crate::core::credentials::{self, CredentialResolver, DeveloperKey, Prompt};
use crate::core::domain::{CredentialSet, Role, RunContext};
use crate::core::git::Git;
use crate::core::merge::{self, MergeInput, WorkspaceStatus};
use crate::core::options::RunOptions;
use crate::core::secrets::SecretStore;
use crate::core::snapshot::Snapshot;
use crate::core::state::{self, RunState};
use crate::error::{CredentialError, Error, Result};

/// External capabilities a run talks to.
pub struct Capabilities<'a> {
    pub git: &'a dyn Git,
    pub store: &'a dyn SecretStore,
    pub cloud: &'a dyn CloudSecrets,
    pub prompt: &'a dyn Prompt,
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Outcome {
    pub context: RunContext,
    pub role: Role,
    pub workspace: WorkspaceStatus,
}

/// Prepare the working globals for the collection runner.
///
/// # Errors
///
/// Context errors abort before anything is read or written. Credential
/// errors write a partial globals file first. A missing workspace binding
/// is reported after the globals have been written.
pub fn run(options: &RunOptions, caps: &Capabilities<'_>) -> Result<Outcome> {
    let context = context::resolve(caps.git, options)?;

    let base = Snapshot::load(&options.globals_base_path())?;
    let prior = Snapshot::load_optional(&options.globals_path())?;
    let run_state = state::load(options)?;
    debug!(state = run_state.label(), prior = prior.is_some(), "previous run");

    let resolver = CredentialResolver::new(options, caps.store, caps.cloud, caps.prompt);

    let developer = match resolver.developer_key(&context, &run_state, prior.as_ref()) {
        Ok(developer) => developer,
        Err(e) => {
            if matches!(e, Error::Credential(CredentialError::MissingDeveloper)) {
                write_partial(options, &base, &context, "", prior.as_ref(), false);
            }
            return Err(e);
        }
    };

    let admin = match resolver.admin_key() {
        Ok(admin) => admin,
        Err(e) => {
            let has_developer_key = !matches!(developer, DeveloperKey::MirrorAdmin);
            write_partial(
                options,
                &base,
                &context,
                developer.known(),
                prior.as_ref(),
                has_developer_key,
            );
            return Err(e);
        }
    };

    let developer = match resolver.confirm_developer_key(&context, developer, &admin) {
        Ok(developer) => developer,
        Err(e) => {
            if matches!(e, Error::Credential(CredentialError::MissingDeveloper)) {
                write_partial(options, &base, &context, "", prior.as_ref(), false);
            }
            return Err(e);
        }
    };

    let credentials = credentials::assemble(&context, admin, developer)?;

    let mut snapshot = base;
    merge::fill(
        &mut snapshot,
        &MergeInput {
            context: &context,
            credentials: &credentials,
            cloud_secret_id: options.cloud_secret_id.as_deref(),
            prior: prior.as_ref(),
            naming: &options.naming,
        },
    )?;

    let persisted = merge::persist(&snapshot, &options.globals_path());
    let written = !matches!(persisted, Err(Error::Snapshot(_) | Error::Io(_)));
    if written && !context.is_main_run() {
        state::save(options, &RunState::after_run(&context))?;
    }

    let workspace = persisted?;
    Ok(Outcome {
        role: credentials.role(),
        context,
        workspace,
    })
}

/// Best-effort write of whatever was resolved before a credential failure.
///
/// Failures here are logged; the credential error is what the caller reports.
fn write_partial(
    options: &RunOptions,
    base: &Snapshot,
    context: &RunContext,
    developer_key: &str,
    prior: Option<&Snapshot>,
    keep_developer_key: bool,
) {
    let mut partial = base.clone();
    let credentials = CredentialSet::new(String::new(), developer_key.to_string());
    let input = MergeInput {
        context,
        credentials: &credentials,
        cloud_secret_id: options.cloud_secret_id.as_deref(),
        prior,
        naming: &options.naming,
    };

    if let Err(e) = merge::fill(&mut partial, &input) {
        warn!(error = %e, "partial globals not written");
        return;
    }
    if let Err(e) = partial.save(&options.globals_path()) {
        warn!(error = %e, "partial globals not written");
        return;
    }
    warn!(path = %options.globals_path().display(), "wrote partial globals");

    if keep_developer_key && !context.is_main_run() {
        if let Err(e) = state::save(options, &RunState::after_run(context)) {
            warn!(error = %e, "run state not updated");
        }
    }
}
