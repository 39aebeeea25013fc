//! Immutable per-invocation options.
//!
//! Built once from `restnest.toml` and the command line, then passed by
//! reference through every stage of a run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::config::{Config, Naming};
use crate::core::constants;

/// Where the admin Postman API key is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// Read from the local secret store
    #[default]
    Local,
    /// Fetch from the cloud secret manager and store locally
    Cloud,
}

/// Options for a prep run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding globals, state and secrets files
    pub environments: PathBuf,
    /// Admin key source
    pub secret_source: SecretSource,
    /// Cloud secret scope (GCP project id, Azure KeyVault, ...)
    pub cloud_secret_id: Option<String>,
    /// Feature string used instead of the current branch name
    pub feature_override: Option<String>,
    /// Repository/workspace naming tokens
    pub naming: Naming,
    /// Local secret store key of the admin API key
    pub admin_secret_key: String,
    /// Cloud secret name of the admin API key
    pub cloud_secret_name: String,
}

/// Command-line values that take precedence over `restnest.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub environments: Option<PathBuf>,
    pub secret_source: Option<SecretSource>,
    pub cloud_secret_id: Option<String>,
    pub feature_override: Option<String>,
}

impl RunOptions {
    /// Combine project configuration with command-line overrides.
    ///
    /// Empty strings count as "not given", so `--cloudSecretId ""` behaves
    /// like omitting the flag.
    pub fn new(config: Config, overrides: Overrides) -> Self {
        Self {
            environments: overrides
                .environments
                .unwrap_or(config.paths.environments),
            secret_source: overrides.secret_source.unwrap_or(config.secrets.source),
            cloud_secret_id: non_empty(overrides.cloud_secret_id),
            feature_override: non_empty(overrides.feature_override),
            naming: config.naming,
            admin_secret_key: config.secrets.admin_key,
            cloud_secret_name: config.secrets.cloud_secret_name,
        }
    }

    /// Globals template path.
    pub fn globals_base_path(&self) -> PathBuf {
        self.environments.join(constants::GLOBALS_BASE_FILE)
    }

    /// Working globals path.
    pub fn globals_path(&self) -> PathBuf {
        self.environments.join(constants::GLOBALS_FILE)
    }

    /// Run-state record path.
    pub fn state_path(&self) -> PathBuf {
        self.environments.join(constants::STATE_FILE)
    }

    /// Legacy main-run marker path.
    pub fn legacy_main_marker_path(&self) -> PathBuf {
        self.environments.join(constants::LEGACY_MAIN_MARKER_FILE)
    }

    /// Local secret store template path.
    pub fn secrets_base_path(&self) -> PathBuf {
        self.environments.join(constants::SECRETS_BASE_FILE)
    }

    /// Local secret store path.
    pub fn secrets_path(&self) -> PathBuf {
        self.environments.join(constants::SECRETS_FILE)
    }

    /// Environments directory.
    pub fn environments(&self) -> &Path {
        &self.environments
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
