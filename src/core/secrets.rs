//! Local secret store.
//!
//! Secrets live in a globals-shaped file next to the working globals
//! (`restnest-secrets.postman_globals.json`, never committed). On first use it
//! is seeded from its committed base file.
//!
//! ## Adding a New Store
//!
//! Implement [`SecretStore`]; `read_one` has a default that ignores
//! placeholder values, so a store only needs to load and persist.

use std::fs;

use tracing::{debug, info};

use crate::core::options::RunOptions;
use crate::core::snapshot::Snapshot;
use crate::error::Result;

/// Locally stored secrets.
pub trait SecretStore {
    /// Load all secrets.
    fn read_all(&self) -> Result<Snapshot>;

    /// A bound secret value. Placeholders and empty values count as absent.
    fn read_one(&self, secrets: &Snapshot, key: &str) -> Option<String> {
        secrets
            .binding(key)
            .and_then(|b| b.bound().map(str::to_string))
    }

    /// Set a secret and persist the store.
    fn write_one(&self, secrets: &mut Snapshot, key: &str, value: &str) -> Result<()>;
}

/// File-backed secret store.
pub struct FileSecretStore {
    base_path: std::path::PathBuf,
    path: std::path::PathBuf,
}

impl FileSecretStore {
    pub fn new(options: &RunOptions) -> Self {
        Self {
            base_path: options.secrets_base_path(),
            path: options.secrets_path(),
        }
    }
}

impl SecretStore for FileSecretStore {
    fn read_all(&self) -> Result<Snapshot> {
        if !self.path.exists() && self.base_path.exists() {
            info!(path = %self.path.display(), "seeding local secrets from base");
            fs::copy(&self.base_path, &self.path)?;
        }

        let secrets = Snapshot::load_optional(&self.path)?.unwrap_or_default();
        debug!(entries = secrets.len(), "local secrets loaded");
        Ok(secrets)
    }

    fn write_one(&self, secrets: &mut Snapshot, key: &str, value: &str) -> Result<()> {
        secrets.upsert(key, value);
        secrets.save(&self.path)?;
        debug!(key = %key, "local secret written");
        Ok(())
    }
}
