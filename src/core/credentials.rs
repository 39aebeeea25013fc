//! Credential resolution.
//!
//! A run needs the admin Postman API key and a developer key. Main runs use
//! the admin key for both; developer runs carry their key over from the
//! previous developer run or ask for it.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::cloud::CloudSecrets;
use crate::core::constants;
use crate::core::domain::{CredentialSet, GlobalKey, RunContext};
use crate::core::options::{RunOptions, SecretSource};
use crate::core::secrets::SecretStore;
use crate::core::snapshot::Snapshot;
use crate::core::state::{self, RunState};
use crate::error::{CredentialError, Result};

/// Interactive line input.
pub trait Prompt {
    /// Ask for one line. An empty answer is returned as an empty string.
    fn prompt_line(&self, message: &str) -> Result<String>;
}

/// Where the developer key of a run comes from.
pub enum DeveloperKey {
    /// Reused from the previous developer run's globals
    Carried(Zeroizing<String>),
    /// Entered at the prompt
    Prompted(Zeroizing<String>),
    /// Main run: same as the admin key
    MirrorAdmin,
}

impl DeveloperKey {
    /// Value known before the admin key is resolved, for partial writes.
    pub fn known(&self) -> &str {
        match self {
            Self::Carried(key) | Self::Prompted(key) => key.as_str(),
            Self::MirrorAdmin => "",
        }
    }
}

/// Resolves the admin and developer keys of a run.
pub struct CredentialResolver<'a> {
    options: &'a RunOptions,
    store: &'a dyn SecretStore,
    cloud: &'a dyn CloudSecrets,
    prompt: &'a dyn Prompt,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(
        options: &'a RunOptions,
        store: &'a dyn SecretStore,
        cloud: &'a dyn CloudSecrets,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self {
            options,
            store,
            cloud,
            prompt,
        }
    }

    /// Resolve both keys in one step.
    pub fn resolve(
        &self,
        ctx: &RunContext,
        state: &RunState,
        prior: Option<&Snapshot>,
    ) -> Result<CredentialSet> {
        let developer = self.developer_key(ctx, state, prior)?;
        let admin = self.admin_key()?;
        let developer = self.confirm_developer_key(ctx, developer, &admin)?;
        assemble(ctx, admin, developer)
    }

    /// Determine the developer key and record the run-state transition.
    ///
    /// A main run records `MainRunCompleted` up front. A developer run only
    /// trusts the previous globals when the last run was a developer run; a
    /// main-run record is cleared and the key is asked for again.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MissingDeveloper` if prompting yields nothing.
    pub fn developer_key(
        &self,
        ctx: &RunContext,
        state: &RunState,
        prior: Option<&Snapshot>,
    ) -> Result<DeveloperKey> {
        if ctx.is_main_run() {
            state::save(self.options, &RunState::after_run(ctx))?;
            return Ok(DeveloperKey::MirrorAdmin);
        }

        info!(
            repository = %ctx.repository(),
            task = %ctx.task(),
            "preparing developer run"
        );

        if let RunState::MainRunCompleted { .. } = state {
            warn!("previous run was a main run, developer key must be entered again");
            state::save(self.options, &RunState::NoPriorRun)?;
        }

        let carried = prior
            .filter(|_| state.trusts_developer_key())
            .and_then(|globals| {
                globals
                    .binding(GlobalKey::PostmanApiKeyDeveloper.as_str())
                    .and_then(|b| b.bound().map(str::to_string))
            });

        if let Some(key) = carried {
            debug!("reusing developer key from previous run");
            return Ok(DeveloperKey::Carried(Zeroizing::new(key)));
        }

        self.prompt_developer_key()
    }

    /// Drop a carried developer key that turns out to be the admin key.
    ///
    /// Globals left by a main run look like a developer run when no run-state
    /// record exists; their developer key is the admin key. Such a key is
    /// asked for again instead of failing every later developer run.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MissingDeveloper` if prompting yields nothing.
    pub fn confirm_developer_key(
        &self,
        ctx: &RunContext,
        developer: DeveloperKey,
        admin: &str,
    ) -> Result<DeveloperKey> {
        match developer {
            DeveloperKey::Carried(key) if !ctx.is_main_run() && key.as_str() == admin => {
                warn!("previous developer key is the admin key, developer key must be entered again");
                self.prompt_developer_key()
            }
            other => Ok(other),
        }
    }

    fn prompt_developer_key(&self) -> Result<DeveloperKey> {
        let answer = Zeroizing::new(self.prompt.prompt_line(constants::DEVELOPER_KEY_PROMPT)?);
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CredentialError::MissingDeveloper.into());
        }
        Ok(DeveloperKey::Prompted(Zeroizing::new(answer.to_string())))
    }

    /// Fetch the admin key from the configured source.
    ///
    /// Cloud lookups are written back to the local store so later local runs
    /// find the key.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MissingAdmin` if the key is absent or empty,
    /// `CredentialError::MissingCloudScope` in cloud mode without a scope, and
    /// `CredentialError::CloudLookup` if the lookup itself fails.
    pub fn admin_key(&self) -> Result<String> {
        let key = &self.options.admin_secret_key;
        let mut secrets = self.store.read_all()?;

        let admin = match self.options.secret_source {
            SecretSource::Cloud => {
                let scope = self
                    .options
                    .cloud_secret_id
                    .as_deref()
                    .ok_or(CredentialError::MissingCloudScope)?;
                let value = self
                    .cloud
                    .fetch_secret(&self.options.cloud_secret_name, scope)?;
                if !value.is_empty() {
                    self.store.write_one(&mut secrets, key, &value)?;
                }
                Some(value)
            }
            SecretSource::Local => self.store.read_one(&secrets, key),
        };

        match admin.filter(|v| !v.is_empty()) {
            Some(admin) => {
                debug!(source = ?self.options.secret_source, "admin key resolved");
                Ok(admin)
            }
            None => Err(CredentialError::MissingAdmin { key: key.clone() }.into()),
        }
    }
}

/// Combine the resolved keys.
///
/// # Errors
///
/// Returns `CredentialError::DeveloperKeyIsAdmin` if a developer run would
/// act with the admin key.
pub fn assemble(ctx: &RunContext, admin: String, developer: DeveloperKey) -> Result<CredentialSet> {
    let developer = match developer {
        DeveloperKey::MirrorAdmin => admin.clone(),
        DeveloperKey::Carried(key) | DeveloperKey::Prompted(key) => key.to_string(),
    };

    if !ctx.is_main_run() && developer == admin {
        return Err(CredentialError::DeveloperKeyIsAdmin.into());
    }

    let credentials = CredentialSet::new(admin, developer);
    debug!(role = %credentials.role(), "credentials assembled");
    Ok(credentials)
}
