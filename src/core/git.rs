//! Git introspection.
//!
//! Only two facts are needed from git: the origin remote URL and the current
//! branch name. Both go through the [`Git`] trait so the resolver can be
//! driven without a repository.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{GitError, Result};

/// Git state needed to resolve a run context.
pub trait Git {
    /// URL of the `origin` remote, or an empty string when there is none.
    fn remote_url(&self) -> Result<String>;

    /// Short name of the checked-out branch, or an empty string when HEAD is detached.
    fn branch_name(&self) -> Result<String>;
}

/// Git CLI backed implementation.
pub struct SystemGit {
    dir: PathBuf,
}

impl SystemGit {
    /// Query the repository containing `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Run git and return the first line of stdout.
    ///
    /// A non-zero exit (no remote, detached HEAD, not a repository) yields an
    /// empty string; the resolver turns that into a naming error with context.
    fn first_line(&self, args: &[&str]) -> Result<String> {
        let git = which::which("git").map_err(|_| GitError::NotInstalled)?;

        let output = Command::new(git)
            .args(args)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                args: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(args = %args.join(" "), stderr = %stderr.trim(), "git command failed");
            return Ok(String::new());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next().unwrap_or_default().trim().to_string();
        debug!(args = %args.join(" "), output = %line, "git");
        Ok(line)
    }
}

impl Git for SystemGit {
    fn remote_url(&self) -> Result<String> {
        self.first_line(&["config", "--get", "remote.origin.url"])
    }

    fn branch_name(&self) -> Result<String> {
        self.first_line(&["symbolic-ref", "--short", "HEAD"])
    }
}
