//! Tests for error handling and CLI flags.

use crate::skip_without_git;
use crate::support::*;

#[test]
fn test_help_lists_flags() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("--cloudSecretId"));
    assert!(out.contains("--gitFeatureOverride"));
    assert!(out.contains("--secrets"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "restnest-sync");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_restnest-sync") || out.contains("complete"));
}

#[test]
fn test_completions_invalid_shell() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "tcsh"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_invalid_secrets_source_rejected() {
    let t = Test::new();

    let output = t.cmd().args(["--secrets", "vault"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_nonconforming_repository_fails_without_writing() {
    skip_without_git!();
    let t = Test::repo(
        "git@host:org/some-other-repo.git",
        "123456/x",
        Some(ADMIN_KEY),
    );

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not conform");
    assert_nothing_written(&t);
}

#[test]
fn test_missing_remote_fails() {
    skip_without_git!();
    let t = Test::new();
    t.git(&["init", "-q"]);
    t.checkout("123456/x");
    t.write_env(GLOBALS_BASE_FILE, GLOBALS_TEMPLATE);

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not conform");
}

#[test]
fn test_branch_without_task_fails() {
    skip_without_git!();
    let t = Test::billing("feature/add-invoices");

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "has no task identifier");
    assert_stdout_contains(&output, "--gitFeatureOverride");
    assert!(!t.env_exists(GLOBALS_FILE));
}

#[test]
fn test_extra_name_segment_fails_without_writing() {
    skip_without_git!();
    let t = Test::repo(
        "git@host:org/restnest-openapi-billing-v2.git",
        "123456/x",
        Some(ADMIN_KEY),
    );

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "restnest-postman-billing-v2");
    assert!(!t.env_exists(GLOBALS_FILE));
}

#[test]
fn test_missing_admin_key_writes_partial_globals() {
    skip_without_git!();
    let t = Test::repo(BILLING_REMOTE, "123456/x", None);

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "postman-api-key-admin-local");

    assert_global(&t, "postman-api-key-admin", "");
    assert_global(&t, "postman-api-key-developer", DEVELOPER_KEY);
    assert_global(&t, "e2e_git_repo_name", "restnest-openapi-billing");
}

#[test]
fn test_developer_key_equal_to_admin_rejected() {
    skip_without_git!();
    let t = Test::billing("123456/x");

    let output = t.prep_with_answer(&[], ADMIN_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "must differ from the admin key");
}

#[test]
fn test_cloud_without_scope_fails() {
    skip_without_git!();
    let t = Test::billing("refresh/main");

    let output = t.prep(&["--secrets", "cloud"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no cloud secret id");
}

#[test]
fn test_missing_template_fails() {
    skip_without_git!();
    let t = Test::billing("123456/x");
    std::fs::remove_file(t.env_path(GLOBALS_BASE_FILE)).unwrap();

    let output = t.prep_with_answer(&[], DEVELOPER_KEY);
    assert_failure(&output);
    assert_stderr_contains(&output, "globals file not found");
}

#[test]
fn test_malformed_config_reported() {
    let t = Test::new();
    std::fs::write(t.path().join("restnest.toml"), "this is not [ valid toml").unwrap();

    let output = t.status();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_context_error_exit_code_and_hint() {
    use predicates::prelude::*;
    skip_without_git!();
    let t = Test::repo("git@host:org/billing.git", "123456/x", Some(ADMIN_KEY));

    t.cmd()
        .write_stdin(format!("{}\n", DEVELOPER_KEY))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'billing' does not conform"))
        .stdout(predicate::str::contains("restnest-openapi-<domain>"));
}

#[test]
fn test_status_subcommand_help() {
    use predicates::prelude::*;
    let t = Test::new();

    t.cmd()
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show what the last run prepared"));
}
