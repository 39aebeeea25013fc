//! Test fixtures and constants.

/// Environments directory relative to the repository root.
pub const ENVIRONMENTS_DIR: &str = "restnest-postman/environments";

pub const GLOBALS_BASE_FILE: &str = "restnest-postman.postman_globals.base.json";
pub const GLOBALS_FILE: &str = "restnest-postman.postman_globals.json";
pub const STATE_FILE: &str = "restnest-postman.postman_globals.state.json";
pub const LEGACY_MAIN_MARKER_FILE: &str = "restnest-postman.postman_globals.main.json";
pub const SECRETS_FILE: &str = "restnest-secrets.postman_globals.json";

/// Origin remote of a conforming repository.
pub const BILLING_REMOTE: &str = "git@host:org/restnest-openapi-billing.git";

/// Local admin Postman API key.
pub const ADMIN_KEY: &str = "PMAK-admin";

/// Developer Postman API key entered at the prompt.
pub const DEVELOPER_KEY: &str = "PMAK-developer";

/// Globals template as shipped in the repository.
pub const GLOBALS_TEMPLATE: &str = r#"{
  "id": "5f0c2a9e-7d1b-4a55-9a55-2b1c0e0d3c11",
  "values": [
    { "key": "cloud-secrets-id", "value": "<cloud-secrets-id>", "type": "default", "enabled": true },
    { "key": "postman-api-key", "value": "<postman-api-key>", "type": "secret", "enabled": true },
    { "key": "postman-api-key-admin", "value": "<postman-api-key-admin>", "type": "secret", "enabled": true },
    { "key": "postman-api-key-developer", "value": "<postman-api-key-developer>", "type": "secret", "enabled": true },
    { "key": "e2e_git_repo_name", "value": "<e2e_git_repo_name>", "type": "default", "enabled": true },
    { "key": "e2e_git_repo_feature_task", "value": "<e2e_git_repo_feature_task>", "type": "default", "enabled": true },
    { "key": "repo_workspace_name", "value": "<repo_workspace_name>", "type": "default", "enabled": true },
    { "key": "repo_workspace_id", "value": "<repo_workspace_id>", "type": "default", "enabled": true },
    { "key": "postman_base_url", "value": "https://api.getpostman.com", "type": "default", "enabled": true }
  ],
  "name": "restnest-postman",
  "_postman_variable_scope": "globals"
}
"#;

/// Local secret store holding `admin` as the admin key.
pub fn secrets_json(admin: &str) -> String {
    format!(
        r#"{{
  "values": [
    {{ "key": "postman-api-key-admin-local", "value": "{}", "type": "secret", "enabled": true }}
  ],
  "name": "restnest-secrets"
}}
"#,
        admin
    )
}
