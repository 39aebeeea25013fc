//! Recognized globals keys.

use std::fmt;

/// A globals key that a prep run computes a value for.
///
/// Every other key in the template passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKey {
    CloudSecretsId,
    PostmanApiKey,
    PostmanApiKeyAdmin,
    PostmanApiKeyDeveloper,
    GitRepoName,
    GitFeatureTask,
    WorkspaceName,
}

impl GlobalKey {
    /// All recognized keys.
    pub const ALL: [GlobalKey; 7] = [
        Self::CloudSecretsId,
        Self::PostmanApiKey,
        Self::PostmanApiKeyAdmin,
        Self::PostmanApiKeyDeveloper,
        Self::GitRepoName,
        Self::GitFeatureTask,
        Self::WorkspaceName,
    ];

    /// Key as it appears in the globals file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloudSecretsId => "cloud-secrets-id",
            Self::PostmanApiKey => "postman-api-key",
            Self::PostmanApiKeyAdmin => "postman-api-key-admin",
            Self::PostmanApiKeyDeveloper => "postman-api-key-developer",
            Self::GitRepoName => "e2e_git_repo_name",
            Self::GitFeatureTask => "e2e_git_repo_feature_task",
            Self::WorkspaceName => "repo_workspace_name",
        }
    }

    /// Look up a recognized key by its globals name.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for GlobalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
