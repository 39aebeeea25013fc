//! Assertions over command output and the files a run leaves behind.

use std::process::Output;

use super::{Test, GLOBALS_FILE, STATE_FILE};

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

pub fn stdout(output: &Output) -> String {
    text(&output.stdout)
}

pub fn stderr(output: &Output) -> String {
    text(&output.stderr)
}

/// The run exited 0. On failure both streams are shown, since hints go to
/// stdout and errors to stderr.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "run failed ({})\nstdout:\n{}\nstderr:\n{}",
        output.status,
        stdout(output),
        stderr(output)
    );
}

/// The run exited non-zero.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "run unexpectedly succeeded\nstdout:\n{}",
        stdout(output)
    );
}

fn assert_stream(name: &str, actual: &str, needle: &str, present: bool) {
    assert_eq!(
        actual.contains(needle),
        present,
        "{} {} '{}':\n{}",
        name,
        if present { "missing" } else { "should not contain" },
        needle,
        actual
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    assert_stream("stdout", &stdout(output), needle, true);
}

pub fn assert_stdout_excludes(output: &Output, needle: &str) {
    assert_stream("stdout", &stdout(output), needle, false);
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    assert_stream("stderr", &stderr(output), needle, true);
}

/// `key` in the working globals holds `expected`.
pub fn assert_global(t: &Test, key: &str, expected: &str) {
    assert_eq!(
        t.global(key).as_deref(),
        Some(expected),
        "globals key '{}'",
        key
    );
}

/// All three key slots carry `key` (a main run).
pub fn assert_keys_mirror(t: &Test, key: &str) {
    for slot in [
        "postman-api-key",
        "postman-api-key-admin",
        "postman-api-key-developer",
    ] {
        assert_global(t, slot, key);
    }
}

/// Developer slots carry `developer`, the admin slot carries `admin`.
pub fn assert_developer_keys(t: &Test, admin: &str, developer: &str) {
    assert_global(t, "postman-api-key", developer);
    assert_global(t, "postman-api-key-admin", admin);
    assert_global(t, "postman-api-key-developer", developer);
}

/// Neither globals nor run state were written.
pub fn assert_nothing_written(t: &Test) {
    assert!(!t.env_exists(GLOBALS_FILE), "globals were written");
    assert!(!t.env_exists(STATE_FILE), "run state was written");
}
