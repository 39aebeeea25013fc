//! Constants used throughout restnest-sync.
//!
//! Centralizes file names, naming tokens and secret key names.

/// Project configuration file name (restnest.toml).
pub const CONFIG_FILE: &str = "restnest.toml";

/// Default environments directory, relative to the repository root.
pub const ENVIRONMENTS_DIR: &str = "restnest-postman/environments";

/// Globals template, copied fresh on every run.
pub const GLOBALS_BASE_FILE: &str = "restnest-postman.postman_globals.base.json";

/// Working globals consumed by the collection runner.
pub const GLOBALS_FILE: &str = "restnest-postman.postman_globals.json";

/// Run-state record written next to the working globals.
pub const STATE_FILE: &str = "restnest-postman.postman_globals.state.json";

/// Marker left by older tooling after a main run. Read for migration, then removed.
pub const LEGACY_MAIN_MARKER_FILE: &str = "restnest-postman.postman_globals.main.json";

/// Local secret store template.
pub const SECRETS_BASE_FILE: &str = "restnest-secrets.postman_globals.base.json";

/// Local secret store.
pub const SECRETS_FILE: &str = "restnest-secrets.postman_globals.json";

/// Required prefix of the git repository name.
pub const REPOSITORY_PREFIX: &str = "restnest-openapi-";

/// Prefix substituted into the repository name to form the workspace name.
pub const WORKSPACE_PREFIX: &str = "restnest-postman-";

/// Number of `-` delimited segments in a workspace name.
pub const WORKSPACE_SEGMENTS: usize = 3;

/// Task identifier of a main (CI) run.
pub const MAIN_TASK: &str = "main";

/// Reserved branch names that refresh main.
pub const REFRESH_MAIN_BRANCHES: &[&str] = &["refresh/main", "refresh-main"];

/// Local secret store key holding the admin Postman API key.
pub const ADMIN_SECRET_KEY: &str = "postman-api-key-admin-local";

/// Cloud secret name holding the admin Postman API key.
pub const CLOUD_SECRET_NAME: &str = "postman_apikey";

/// Globals key holding the bound workspace id (set by the collection runner).
pub const WORKSPACE_ID_KEY: &str = "repo_workspace_id";

/// Prompt shown when a developer key is needed.
pub const DEVELOPER_KEY_PROMPT: &str = "Please enter your Postman API Key";

/// Where developers create their Postman API key.
pub const API_KEYS_URL: &str = "https://*.postman.co/settings/me/api-keys";
