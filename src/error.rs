//! Error types for restnest-sync.
//!
//! Errors are grouped by the stage of a run that raises them. Context and
//! credential failures abort before anything is merged; workspace failures
//! are raised after the snapshot has been written.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures deriving the run context from git.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("repository name '{name}' does not conform, expected {prefix}<domain> (forks may add a .suffix)")]
    InvalidRepository { name: String, prefix: String },

    #[error("branch '{branch}' has no task identifier, expected e.g. 123456/this-branch, bla/123456/this-branch or refresh/main")]
    InvalidTaskIdentifier { branch: String },
}

/// Failures resolving the admin or developer credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("admin Postman API key missing: '{key}' is not set in the secret store")]
    MissingAdmin { key: String },

    #[error("developer Postman API key is required")]
    MissingDeveloper,

    #[error("developer Postman API key must differ from the admin key on a developer run")]
    DeveloperKeyIsAdmin,

    #[error("cloud secret lookup failed for '{name}': {reason}")]
    CloudLookup { name: String, reason: String },

    #[error("cloud secrets selected but no cloud secret id given")]
    MissingCloudScope,
}

/// Failures validating the merged snapshot against workspace invariants.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Postman repo name '{name}' does not conform to naming standard: restnest-postman-<domain>")]
    Naming { name: String },

    #[error("could not prep for workspace sync due to missing global variables repo_workspace_name / repo_workspace_id")]
    MissingBinding,
}

/// Failures reading or writing a globals document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("globals file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize globals: {0}")]
    Serialize(serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures reading or writing the run-state record.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to parse run state {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize run state: {0}")]
    Serialize(serde_json::Error),
}

/// Failures loading `restnest.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures talking to git.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("git not found on PATH")]
    NotInstalled,

    #[error("failed to run `git {args}`: {source}")]
    Spawn {
        args: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
