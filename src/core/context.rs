//! Run context resolution.
//!
//! Derives the repository name from the origin remote and the task
//! identifier from the branch name (or an explicit feature override).

use tracing::{debug, info};

use crate::core::constants;
use crate::core::domain::{RunContext, TaskId};
use crate::core::git::Git;
use crate::core::options::RunOptions;
use crate::error::{ContextError, Result};

/// Resolve the context of this run.
///
/// The feature override replaces the branch name; it is parsed the same way,
/// so `--gitFeatureOverride refresh/main` yields the `main` task.
///
/// # Errors
///
/// - `ContextError::InvalidRepository` if the remote's repository name lacks
///   the configured prefix (including when there is no remote).
/// - `ContextError::InvalidTaskIdentifier` if no task identifier can be
///   found in the feature string.
pub fn resolve(git: &dyn Git, options: &RunOptions) -> Result<RunContext> {
    let remote = git.remote_url()?;
    let repository = repository_name(&remote);
    let prefix = &options.naming.repository_prefix;
    if !repository.starts_with(prefix.as_str()) {
        return Err(ContextError::InvalidRepository {
            name: repository,
            prefix: prefix.clone(),
        }
        .into());
    }

    let feature = match &options.feature_override {
        Some(feature) => {
            info!(feature = %feature, "using feature override");
            feature.clone()
        }
        None => git.branch_name()?,
    };

    let task = task_identifier(&feature)
        .ok_or_else(|| ContextError::InvalidTaskIdentifier { branch: feature.clone() })?;

    debug!(repository = %repository, task = %task, "run context resolved");
    Ok(RunContext::new(repository, task))
}

/// Repository name from a remote URL.
///
/// Takes the last path segment without `.git` and drops everything from the
/// first `.`, so forks named `restnest-openapi-billing.me` map back to
/// `restnest-openapi-billing`.
pub fn repository_name(remote: &str) -> String {
    let remote = remote.trim().trim_end_matches('/');
    let remote = remote.strip_suffix(".git").unwrap_or(remote);
    let segment = remote
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or_default();
    segment.split('.').next().unwrap_or_default().to_string()
}

/// Task identifier from a branch name or feature override.
///
/// The first `-` counts as a `/`. Precedence: a first segment that starts
/// with a number, then such a second segment, then the reserved refresh-main
/// branch. The chosen segment is returned verbatim.
pub fn task_identifier(feature: &str) -> Option<TaskId> {
    let feature = feature.trim();
    let normalized = feature.replacen('-', "/", 1);
    let segments: Vec<&str> = normalized.split('/').collect();
    if segments.len() < 2 {
        return None;
    }

    let task = if is_integer(segments[0]) {
        segments[0]
    } else if is_integer(segments[1]) {
        segments[1]
    } else if constants::REFRESH_MAIN_BRANCHES.contains(&feature) {
        segments[1]
    } else {
        return None;
    };

    TaskId::new(task)
}

/// Whether a segment starts like an integer: optional leading whitespace, an
/// optional sign, then at least one ASCII digit. Trailing text is allowed,
/// so `4567_fix` counts and is used whole.
fn is_integer(segment: &str) -> bool {
    let digits = segment.trim_start();
    let digits = digits
        .strip_prefix(|c| c == '+' || c == '-')
        .unwrap_or(digits);
    matches!(digits.bytes().next(), Some(b) if b.is_ascii_digit())
}
