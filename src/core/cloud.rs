//! Cloud secret manager lookup.
//!
//! Fetches the admin Postman API key from Google Cloud Secret Manager via the
//! gcloud CLI.
//!
//! ## Requirements
//!
//! - `gcloud` CLI must be installed and authenticated
//! - User must have `secretmanager.versions.access` on the secret
//!
//! ## Usage
//!
//! ```bash
//! restnest-sync --secrets cloud --cloudSecretId my-gcp-project
//! ```

use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::{CredentialError, Result};

/// A cloud secret manager.
pub trait CloudSecrets {
    /// Latest value of secret `name` within `scope_id` (project, vault, ...).
    fn fetch_secret(&self, name: &str, scope_id: &str) -> Result<String>;
}

/// Google Cloud Secret Manager through the gcloud CLI.
pub struct Gcloud;

impl Gcloud {
    fn lookup_err(name: &str, reason: impl Into<String>) -> CredentialError {
        CredentialError::CloudLookup {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl CloudSecrets for Gcloud {
    fn fetch_secret(&self, name: &str, scope_id: &str) -> Result<String> {
        trace!(secret = %name, project = %scope_id, "fetching cloud secret");

        let gcloud = which::which("gcloud").map_err(|_| {
            Self::lookup_err(
                name,
                "gcloud CLI not found. Install it from https://cloud.google.com/sdk/docs/install",
            )
        })?;

        let output = Command::new(gcloud)
            .args([
                "secrets",
                "versions",
                "access",
                "latest",
                "--secret",
                name,
                "--project",
                scope_id,
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Self::lookup_err(name, format!("failed to spawn gcloud: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::lookup_err(name, stderr.trim().to_string()).into());
        }

        let value = String::from_utf8(output.stdout)
            .map_err(|e| Self::lookup_err(name, format!("UTF-8 error: {}", e)))?;

        trace!(value_len = value.trim().len(), "fetched cloud secret");
        Ok(value.trim().to_string())
    }
}
