//! Run context type.
//!
//! Identifies the repository and feature task a run prepares globals for.

use std::fmt;

use crate::core::constants;

/// A non-empty task identifier, e.g. `123456` or `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap a task identifier, rejecting empty strings.
    pub fn new(task: impl Into<String>) -> Option<Self> {
        let task = task.into();
        if task.is_empty() {
            None
        } else {
            Some(Self(task))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the CI main task.
    pub fn is_main(&self) -> bool {
        self.0 == constants::MAIN_TASK
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository identity and task of a run. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    repository: String,
    task: TaskId,
}

impl RunContext {
    pub fn new(repository: impl Into<String>, task: TaskId) -> Self {
        Self {
            repository: repository.into(),
            task,
        }
    }

    /// Repository name without fork suffix, e.g. `restnest-openapi-billing`
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn task(&self) -> &TaskId {
        &self.task
    }

    /// Main (CI) runs use the admin key for both roles.
    pub fn is_main_run(&self) -> bool {
        self.task.is_main()
    }
}
