//! Credential types.
//!
//! Key material is wrapped in `Zeroizing` so it is wiped when the set drops.

use std::fmt;

use zeroize::Zeroizing;

/// Which identity the collection runner acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin key used for both roles (main runs)
    Admin,
    /// Distinct developer key
    Developer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Developer => f.write_str("developer"),
        }
    }
}

/// Admin and developer Postman API keys resolved for a run.
pub struct CredentialSet {
    admin_key: Zeroizing<String>,
    developer_key: Zeroizing<String>,
    role: Role,
}

impl CredentialSet {
    /// Assemble a set. The role is `Admin` exactly when both keys match.
    pub fn new(admin_key: String, developer_key: String) -> Self {
        let role = if developer_key == admin_key {
            Role::Admin
        } else {
            Role::Developer
        };
        Self {
            admin_key: Zeroizing::new(admin_key),
            developer_key: Zeroizing::new(developer_key),
            role,
        }
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }

    pub fn developer_key(&self) -> &str {
        &self.developer_key
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Key the collection runner authenticates with (`postman-api-key`).
    pub fn active_key(&self) -> &str {
        match self.role {
            Role::Admin => &self.admin_key,
            Role::Developer => &self.developer_key,
        }
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("admin_key", &"<redacted>")
            .field("developer_key", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
