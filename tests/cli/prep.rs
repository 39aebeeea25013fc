//! Tests for the default prep run.

use crate::skip_without_git;
use crate::support::*;

#[test]
fn test_developer_run_prompts_and_writes_globals() {
    skip_without_git!();
    let t = Test::billing("123456/add-invoices");

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "prepared for OpenAPI workspace sync with new repo restnest-postman-billing",
    );
    assert_stdout_contains(&output, "api-keys");

    assert_developer_keys(&t, ADMIN_KEY, DEVELOPER_KEY);
    assert_global(&t, "e2e_git_repo_name", "restnest-openapi-billing");
    assert_global(&t, "e2e_git_repo_feature_task", "123456");
    assert_global(&t, "repo_workspace_name", "restnest-postman-billing");
    assert_global(&t, "repo_workspace_id", "<repo_workspace_id>");
    assert_global(&t, "cloud-secrets-id", "");
    assert!(t.env_exists(STATE_FILE));
}

#[test]
fn test_unrecognized_keys_and_document_fields_survive() {
    skip_without_git!();
    let t = Test::billing("123456/add-invoices");

    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));

    let globals = t.read_env(GLOBALS_FILE);
    assert_eq!(
        global_value(&globals, "postman_base_url").as_deref(),
        Some("https://api.getpostman.com")
    );
    assert!(globals.contains("\"_postman_variable_scope\": \"globals\""));
    assert!(globals.contains("\"type\": \"secret\""));
}

#[test]
fn test_second_developer_run_reuses_key() {
    skip_without_git!();
    let t = Test::billing("123456/add-invoices");

    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));

    // No answer on stdin: the key must come from the previous globals
    let output = t.prep(&[]);
    assert_success(&output);
    assert_stdout_excludes(&output, "api-keys");
    assert_global(&t, "postman-api-key", DEVELOPER_KEY);
}

#[test]
fn test_main_run_uses_admin_key_everywhere() {
    skip_without_git!();
    let t = Test::billing("feature/anything");

    let output = t.prep(&["--gitFeatureOverride", "refresh/main"]);
    assert_success(&output);
    assert_stdout_excludes(&output, "api-keys");

    assert_keys_mirror(&t, ADMIN_KEY);
    assert_global(&t, "e2e_git_repo_feature_task", "main");
}

#[test]
fn test_main_run_is_idempotent() {
    skip_without_git!();
    let t = Test::billing("refresh/main");

    assert_success(&t.prep(&[]));
    let first = t.read_env(GLOBALS_FILE);
    assert_success(&t.prep(&[]));
    let second = t.read_env(GLOBALS_FILE);

    assert_eq!(first, second);
}

#[test]
fn test_developer_run_after_main_run_prompts_again() {
    skip_without_git!();
    let t = Test::billing("refresh/main");
    assert_success(&t.prep(&[]));

    t.checkout("123456/add-invoices");
    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_success(&output);
    assert_stdout_contains(&output, "api-keys");
    assert_global(&t, "postman-api-key", DEVELOPER_KEY);
    assert_global(&t, "postman-api-key-developer", DEVELOPER_KEY);
}

#[test]
fn test_developer_run_without_answer_fails_after_main_run() {
    skip_without_git!();
    let t = Test::billing("refresh/main");
    assert_success(&t.prep(&[]));

    t.checkout("123456/add-invoices");
    let output = t.prep(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "developer Postman API key is required");
}

#[test]
fn test_legacy_main_marker_forces_prompt_and_is_removed() {
    skip_without_git!();
    let t = Test::billing("123456/add-invoices");
    t.write_env(GLOBALS_FILE, GLOBALS_TEMPLATE);
    t.write_env(LEGACY_MAIN_MARKER_FILE, "{}\n");

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_success(&output);
    assert_stdout_contains(&output, "api-keys");
    assert!(!t.env_exists(LEGACY_MAIN_MARKER_FILE));
    assert!(t.env_exists(STATE_FILE));
}

#[test]
fn test_bound_workspace_is_reported_as_existing() {
    skip_without_git!();
    let t = Test::billing("123456/add-invoices");
    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));

    // The collection runner binds the workspace after creating it
    let bound = t
        .read_env(GLOBALS_FILE)
        .replace("<repo_workspace_id>", "ws-0042");
    t.write_env(GLOBALS_FILE, &bound);

    let output = t.prep(&[]);
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "prepared for sync from Postman repo workspace restnest-postman-billing",
    );
    assert_global(&t, "repo_workspace_id", "ws-0042");
}

#[test]
fn test_fork_suffix_is_stripped() {
    skip_without_git!();
    let t = Test::repo(
        "https://github.com/me/restnest-openapi-billing.me.git",
        "123456/add-invoices",
        Some(ADMIN_KEY),
    );

    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));
    assert_global(&t, "e2e_git_repo_name", "restnest-openapi-billing");
}

#[test]
fn test_cloud_secret_id_is_recorded() {
    skip_without_git!();
    let t = Test::billing("bla/42/more");

    let output = t.prep_with_answer(&["--cloudSecretId", "my-project"], DEVELOPER_KEY);
    assert_success(&output);
    assert_global(&t, "cloud-secrets-id", "my-project");
    assert_global(&t, "e2e_git_repo_feature_task", "42");
}

#[test]
fn test_short_flags_accepted() {
    skip_without_git!();
    let t = Test::billing("feature/anything");

    let output = t.prep_with_answer(&["-c", "proj", "-g", "777/override"], DEVELOPER_KEY);
    assert_success(&output);
    assert_global(&t, "e2e_git_repo_feature_task", "777");
    assert_global(&t, "cloud-secrets-id", "proj");
}

#[test]
fn test_local_secrets_seeded_from_base() {
    skip_without_git!();
    let t = Test::repo(BILLING_REMOTE, "123456/x", None);
    t.write_env("restnest-secrets.postman_globals.base.json", &secrets_json(ADMIN_KEY));

    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));
    assert!(t.env_exists(SECRETS_FILE));
    assert_global(&t, "postman-api-key-admin", ADMIN_KEY);
}

#[test]
fn test_environment_dir_flag() {
    skip_without_git!();
    let t = Test::billing("123456/x");
    let other = t.path().join("elsewhere");
    std::fs::create_dir_all(&other).unwrap();
    std::fs::write(other.join(GLOBALS_BASE_FILE), GLOBALS_TEMPLATE).unwrap();
    std::fs::write(other.join(SECRETS_FILE), secrets_json("other-admin")).unwrap();

    let output = t
        .cmd()
        .args(["--environment-dir", other.to_str().unwrap()])
        .write_stdin(format!("{}\n", DEVELOPER_KEY))
        .output()
        .unwrap();
    assert_success(&output);

    let globals = std::fs::read_to_string(other.join(GLOBALS_FILE)).unwrap();
    assert_eq!(
        global_value(&globals, "postman-api-key-admin").as_deref(),
        Some("other-admin")
    );
    assert!(!t.env_exists(GLOBALS_FILE));
}

#[test]
fn test_branch_with_numeric_prefixed_task() {
    skip_without_git!();
    let t = Test::billing("4567_fix/add-endpoint");

    assert_success(&t.prep_with_answer(&[], DEVELOPER_KEY));
    assert_global(&t, "e2e_git_repo_feature_task", "4567_fix");
}
