//! Project configuration file management.
//!
//! Handles reading and validating the optional `restnest.toml`. Every field
//! has a default, so a repository without the file behaves exactly like one
//! with an empty file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::options::SecretSource;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `restnest.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub naming: Naming,
    pub secrets: Secrets,
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Directory holding the globals and secrets files
    pub environments: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            environments: PathBuf::from(constants::ENVIRONMENTS_DIR),
        }
    }
}

/// Repository and workspace naming tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Naming {
    /// Required prefix of the git repository name, e.g. `restnest-openapi-`
    pub repository_prefix: String,
    /// Replacement prefix for the workspace name, e.g. `restnest-postman-`
    pub workspace_prefix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            repository_prefix: constants::REPOSITORY_PREFIX.to_string(),
            workspace_prefix: constants::WORKSPACE_PREFIX.to_string(),
        }
    }
}

/// Secret lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Secrets {
    /// Where the admin key comes from when no flag is given
    pub source: SecretSource,
    /// Key of the admin API key in the local secret store
    pub admin_key: String,
    /// Name of the admin API key in the cloud secret manager
    pub cloud_secret_name: String,
}

impl Default for Secrets {
    fn default() -> Self {
        Self {
            source: SecretSource::Local,
            admin_key: constants::ADMIN_SECRET_KEY.to_string(),
            cloud_secret_name: constants::CLOUD_SECRET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `restnest.toml` from the current directory, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, or defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if a naming token is unusable.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate naming tokens and secret key names.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("naming.repository_prefix", &self.naming.repository_prefix),
            ("naming.workspace_prefix", &self.naming.workspace_prefix),
        ] {
            if !value.ends_with('-') || value.len() < 2 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("'{}' must be a non-empty prefix ending in '-'", value),
                }
                .into());
            }
        }

        if self.secrets.admin_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "secrets.admin_key",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if self.secrets.cloud_secret_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "secrets.cloud_secret_name",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
