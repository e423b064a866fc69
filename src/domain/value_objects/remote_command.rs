//! Remote command value object.

/// Prefix marking a command whose failure is never fatal
pub const IGNORE_FAILURE_MARKER: char = '@';

/// A shell command to run on the remote side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    command: String,
    ignore_failure: bool,
}

impl RemoteCommand {
    /// Parse a configured command, stripping a leading `@`
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(IGNORE_FAILURE_MARKER) {
            Some(rest) => Self {
                command: rest.to_string(),
                ignore_failure: true,
            },
            None => Self {
                command: raw.to_string(),
                ignore_failure: false,
            },
        }
    }

    /// Command text without the marker
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether failures of this command are only ever logged
    pub fn ignores_failure(&self) -> bool {
        self.ignore_failure
    }
}

impl From<&str> for RemoteCommand {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl std::fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command)
    }
}
