//! Run-state record.
//!
//! Remembers whether the previous run was a main (CI) run or a developer
//! run, so a developer run never trusts a developer key that a main run left
//! behind. Older tooling encoded this as the presence of marker files; those
//! are read once when no record exists and removed on the next save.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::domain::RunContext;
use crate::core::options::RunOptions;
use crate::error::{Result, StateError};

/// State left behind by the previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    /// No usable previous run
    NoPriorRun,
    /// A developer run wrote the working globals
    DeveloperRunPending { repository: String, task: String },
    /// A main run wrote the working globals with the admin key in both roles
    MainRunCompleted { repository: String },
}

impl RunState {
    /// Whether a developer key carried over from the working globals may be used.
    pub fn trusts_developer_key(&self) -> bool {
        matches!(self, Self::DeveloperRunPending { .. })
    }

    /// State recorded after a run of `ctx` wrote its globals.
    pub fn after_run(ctx: &RunContext) -> Self {
        if ctx.is_main_run() {
            Self::MainRunCompleted {
                repository: ctx.repository().to_string(),
            }
        } else {
            Self::DeveloperRunPending {
                repository: ctx.repository().to_string(),
                task: ctx.task().to_string(),
            }
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPriorRun => "no prior run",
            Self::DeveloperRunPending { .. } => "developer run",
            Self::MainRunCompleted { .. } => "main run",
        }
    }
}

/// On-disk form: the state plus who wrote it and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    #[serde(flatten)]
    state: RunState,
    updated_at: String,
    updated_by: String,
}

/// Load the run state for the environments directory in `options`.
///
/// # Errors
///
/// Returns `StateError::Parse` if the record exists but is malformed.
pub fn load(options: &RunOptions) -> Result<RunState> {
    let path = options.state_path();
    match fs::read_to_string(&path) {
        Ok(contents) => {
            let record: Record =
                serde_json::from_str(&contents).map_err(|source| StateError::Parse {
                    path: path.clone(),
                    source,
                })?;
            debug!(state = record.state.label(), "run state loaded");
            Ok(record.state)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(infer_legacy(options)),
        Err(e) => Err(e.into()),
    }
}

/// Persist `state`, replacing the previous record and any legacy marker.
pub fn save(options: &RunOptions, state: &RunState) -> Result<()> {
    let record = Record {
        state: state.clone(),
        updated_at: chrono::Utc::now().to_rfc3339(),
        updated_by: whoami::username(),
    };
    let mut json = serde_json::to_string_pretty(&record).map_err(StateError::Serialize)?;
    json.push('\n');

    fs::create_dir_all(options.environments())?;
    fs::write(options.state_path(), json)?;
    remove_if_present(&options.legacy_main_marker_path())?;

    debug!(state = state.label(), "run state saved");
    Ok(())
}

/// Derive the state from marker files written by older tooling.
fn infer_legacy(options: &RunOptions) -> RunState {
    if options.legacy_main_marker_path().is_file() {
        info!("found legacy main-run marker");
        RunState::MainRunCompleted {
            repository: String::new(),
        }
    } else if options.globals_path().is_file() {
        RunState::DeveloperRunPending {
            repository: String::new(),
            task: String::new(),
        }
    } else {
        RunState::NoPriorRun
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed legacy marker");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
