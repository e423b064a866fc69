//! Transport Port
//!
//! Abstracts one session to a remote repository (local directory, ssh/scp,
//! or anything a caller registers). The upload orchestrator only talks to
//! this trait; concrete transports live in `infrastructure::transport`.

use std::path::Path;

use crate::domain::value_objects::{AuthenticationInfo, ProxyInfo, Repository};

/// Error raised by a transport
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Source or remote resource does not exist
    #[error("resource does not exist: {0}")]
    ResourceDoesNotExist(String),
    /// Data transfer failed
    #[error("transfer failed: {0}")]
    TransferFailed(String),
    /// Remote side refused access
    #[error("authorization failed: {0}")]
    Authorization(String),
    /// Credentials were rejected
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// Could not open or close the session
    #[error("connection error: {0}")]
    Connection(String),
    /// Remote command returned non-zero or could not be run
    #[error("command '{command}' failed{}{}", exit_code_suffix(.exit_code), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    /// Server configuration could not be applied
    #[error("invalid transport configuration: {0}")]
    Configuration(String),
    /// Operation is not offered by this transport
    #[error("not supported by this transport: {0}")]
    Unsupported(String),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code: {})", code),
        None => String::new(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl TransportError {
    /// True when the failure is a plain non-zero exit rather than an execution fault
    pub fn is_exit_status(&self) -> bool {
        matches!(
            self,
            Self::CommandFailed {
                exit_code: Some(_),
                ..
            }
        )
    }
}

/// Optional capabilities of a transport
///
/// Queried once when the transport is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Can upload a whole directory tree
    pub directory_copy: bool,
    /// Can run shell commands on the remote side
    pub command_execution: bool,
}

/// A session to a remote repository
pub trait Transport: Send {
    /// Capabilities of this transport
    fn capabilities(&self) -> Capabilities;

    /// Apply a server configuration table from the user settings
    ///
    /// The default accepts only an empty table.
    fn configure(&mut self, configuration: &toml::Table) -> Result<(), TransportError> {
        match configuration.keys().next() {
            Some(key) => Err(TransportError::Configuration(format!(
                "unknown configuration key '{}'",
                key
            ))),
            None => Ok(()),
        }
    }

    /// Open the session
    fn connect(
        &mut self,
        repository: &Repository,
        authentication: Option<&AuthenticationInfo>,
        proxy: Option<&ProxyInfo>,
    ) -> Result<(), TransportError>;

    /// Close the session
    fn disconnect(&mut self) -> Result<(), TransportError>;

    /// Upload a single file to `destination`, relative to the repository base
    fn put(&mut self, source: &Path, destination: &str) -> Result<(), TransportError>;

    /// Upload a directory tree to `destination`, relative to the repository base
    fn put_directory(&mut self, source: &Path, destination: &str) -> Result<(), TransportError>;

    /// Run a shell command on the remote side
    fn execute_command(&mut self, command: &str) -> Result<(), TransportError> {
        Err(TransportError::Unsupported(format!(
            "cannot execute '{}'",
            command
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display_with_exit_code() {
        let err = TransportError::CommandFailed {
            command: "ls /nope".to_string(),
            exit_code: Some(2),
            stderr: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "command 'ls /nope' failed (exit code: 2): No such file or directory"
        );
        assert!(err.is_exit_status());
    }

    #[test]
    fn command_failed_display_without_exit_code() {
        let err = TransportError::CommandFailed {
            command: "true".to_string(),
            exit_code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command 'true' failed");
        assert!(!err.is_exit_status());
    }

    #[test]
    fn capabilities_default_to_none() {
        let caps = Capabilities::default();
        assert!(!caps.directory_copy);
        assert!(!caps.command_execution);
    }
}
