//! Upload Result
//!
//! Result types for upload operations.

use std::path::PathBuf;

use serde::Serialize;

/// Steps of one upload session, in the order they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    Idle,
    Configuring,
    Connected,
    PreCommands,
    Transferring,
    PostCommands,
    Chmod,
    Disconnecting,
    Done,
    Failed,
}

/// Which command phase a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPhase {
    Pre,
    Post,
}

impl std::fmt::Display for CommandPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => f.write_str("pre"),
            Self::Post => f.write_str("post"),
        }
    }
}

/// A remote command that failed without aborting the upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandFailure {
    pub phase: CommandPhase,
    pub command: String,
    /// Command carried the ignore-failure marker
    pub ignored: bool,
    pub error: String,
}

/// Outcome of one command phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    /// Commands that were attempted, in order
    pub executed: Vec<String>,
    pub failures: Vec<CommandFailure>,
    /// No unmarked command failed
    pub succeeded: bool,
}

/// Result of a finished upload
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    /// Upload was skipped by configuration
    pub skipped: bool,
    pub source: Option<PathBuf>,
    pub target_path: Option<String>,
    pub repository_url: Option<String>,
    pub protocol: Option<String>,
    /// Source was uploaded as a directory tree
    pub directory: bool,
    pub states: Vec<UploadState>,
    pub commands_executed: usize,
    pub command_failures: Vec<CommandFailure>,
    pub chmod_applied: bool,
    /// Disconnect failed after the session; logged, never fatal
    pub disconnect_error: Option<String>,
}

impl UploadReport {
    pub fn new() -> Self {
        Self {
            states: vec![UploadState::Idle],
            ..Self::default()
        }
    }

    /// Report for a skipped upload
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            states: vec![UploadState::Idle, UploadState::Done],
            ..Self::default()
        }
    }

    pub(crate) fn enter(&mut self, state: UploadState) {
        tracing::debug!(state = ?state, "upload state");
        self.states.push(state);
    }

    pub(crate) fn record_phase(&mut self, outcome: PhaseOutcome) {
        self.commands_executed += outcome.executed.len();
        self.command_failures.extend(outcome.failures);
    }

    pub fn is_success(&self) -> bool {
        self.states.last() == Some(&UploadState::Done)
    }
}
