//! SCP Transport
//!
//! Implements the Transport port for `scp://` and `scpexe://` repositories by
//! driving the system `ssh` and `scp` executables.
//!
//! Unlike rsync, scp doesn't create remote directories, so every transfer is
//! preceded by an `ssh mkdir -p`. Commands run from the remote user's home
//! directory.
//!
//! scp targets are passed unquoted: OpenSSH 9+ transfers over SFTP by default
//! and never hands the remote path to a shell. Only the `ssh` command lines
//! are shell-quoted.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde::Deserialize;

use crate::domain::ports::{Capabilities, Transport, TransportError};
use crate::domain::value_objects::{AuthenticationInfo, ProxyInfo, Repository};

/// Exit code ssh uses for its own (connection) failures
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Settings bound from a server's `configuration` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScpSettings {
    pub ssh_executable: String,
    pub scp_executable: String,
    /// Extra arguments for every ssh invocation
    pub ssh_args: Vec<String>,
    /// Extra arguments for every scp invocation
    pub scp_args: Vec<String>,
    pub strict_host_key_checking: Option<bool>,
}

impl Default for ScpSettings {
    fn default() -> Self {
        Self {
            ssh_executable: "ssh".to_string(),
            scp_executable: "scp".to_string(),
            ssh_args: Vec::new(),
            scp_args: Vec::new(),
            strict_host_key_checking: None,
        }
    }
}

/// Connection details resolved on connect
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    /// `host` or `user@host`
    destination: String,
    port: Option<u16>,
    basedir: String,
    private_key: Option<String>,
}

/// Transport using the system ssh/scp executables
#[derive(Debug, Default)]
pub struct ScpTransport {
    settings: ScpSettings,
    session: Option<Session>,
}

impl ScpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &ScpSettings {
        &self.settings
    }

    fn session(&self) -> Result<&Session, TransportError> {
        self.session
            .as_ref()
            .ok_or_else(|| TransportError::Connection("not connected".to_string()))
    }

    fn host_key_option(&self) -> Option<String> {
        self.settings.strict_host_key_checking.map(|strict| {
            format!(
                "StrictHostKeyChecking={}",
                if strict { "yes" } else { "no" }
            )
        })
    }

    fn ssh_command(&self, session: &Session) -> Command {
        let mut cmd = Command::new(&self.settings.ssh_executable);
        cmd.args(&self.settings.ssh_args);
        if let Some(option) = self.host_key_option() {
            cmd.arg("-o").arg(option);
        }
        if let Some(port) = session.port {
            cmd.arg("-p").arg(port.to_string());
        }
        if let Some(key) = &session.private_key {
            cmd.arg("-i").arg(key);
        }
        cmd.arg(&session.destination);
        cmd.stdin(Stdio::null());
        cmd
    }

    fn scp_command(&self, session: &Session) -> Command {
        let mut cmd = Command::new(&self.settings.scp_executable);
        cmd.args(&self.settings.scp_args);
        if let Some(option) = self.host_key_option() {
            cmd.arg("-o").arg(option);
        }
        if let Some(port) = session.port {
            cmd.arg("-P").arg(port.to_string());
        }
        if let Some(key) = &session.private_key {
            cmd.arg("-i").arg(key);
        }
        cmd.arg("-p"); // preserve timestamps
        cmd.stdin(Stdio::null());
        cmd
    }

    /// `scp [-r] <sources> <destination>:<remote>`
    fn transfer_command(
        &self,
        session: &Session,
        sources: &[PathBuf],
        remote: &str,
        recursive: bool,
    ) -> Command {
        let mut cmd = self.scp_command(session);
        if recursive {
            cmd.arg("-r");
        }
        cmd.args(sources);
        cmd.arg(format!("{}:{}", session.destination, remote));
        cmd
    }

    fn run(mut cmd: Command, label: &str) -> Result<Output, TransportError> {
        tracing::trace!(command = ?cmd, "running {}", label);
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| TransportError::CommandFailed {
                command: label.to_string(),
                exit_code: None,
                stderr: e.to_string(),
            })
    }

    fn stderr_of(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).trim().to_string()
    }

    fn remote_mkdir(&self, session: &Session, dir: &str) -> Result<(), TransportError> {
        if dir.is_empty() || dir == "/" {
            return Ok(());
        }
        let mut cmd = self.ssh_command(session);
        cmd.arg(format!("mkdir -p {}", shell_quote(dir)));
        let output = Self::run(cmd, "mkdir")?;
        if !output.status.success() {
            return Err(TransportError::TransferFailed(format!(
                "failed to create remote directory {}: {}",
                dir,
                Self::stderr_of(&output)
            )));
        }
        Ok(())
    }

    fn scp(&self, mut cmd: Command, what: &Path) -> Result<(), TransportError> {
        let output = Self::run_scp(&mut cmd)?;
        if !output.status.success() {
            return Err(TransportError::TransferFailed(format!(
                "scp of {} failed with exit code {:?}: {}",
                what.display(),
                output.status.code(),
                Self::stderr_of(&output)
            )));
        }
        Ok(())
    }

    fn run_scp(cmd: &mut Command) -> Result<Output, TransportError> {
        tracing::trace!(command = ?cmd, "running scp");
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| TransportError::TransferFailed(format!("cannot run scp: {}", e)))
    }
}

impl Transport for ScpTransport {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            directory_copy: true,
            command_execution: true,
        }
    }

    fn configure(&mut self, configuration: &toml::Table) -> Result<(), TransportError> {
        self.settings = toml::Value::Table(configuration.clone())
            .try_into()
            .map_err(|e: toml::de::Error| TransportError::Configuration(e.to_string()))?;
        Ok(())
    }

    fn connect(
        &mut self,
        repository: &Repository,
        authentication: Option<&AuthenticationInfo>,
        proxy: Option<&ProxyInfo>,
    ) -> Result<(), TransportError> {
        let host = repository.host().ok_or_else(|| {
            TransportError::Connection(format!("no host in {}", repository.url()))
        })?;

        let username = authentication
            .and_then(|a| a.username.as_deref())
            .or_else(|| repository.username());
        let destination = match username {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        };

        if authentication.is_some_and(|a| a.password.is_some()) {
            tracing::warn!(
                repository = repository.id(),
                "password authentication is not supported by the ssh executable; using keys/agent"
            );
        }
        if let Some(proxy) = proxy {
            tracing::debug!(proxy = %proxy.host, "proxy settings are not used by ssh; configure ProxyJump in ssh_args instead");
        }

        let session = Session {
            destination,
            port: repository.port(),
            basedir: repository.basedir(),
            private_key: authentication.and_then(|a| a.private_key.clone()),
        };

        let mut probe = self.ssh_command(&session);
        probe.arg("true");
        let output = Self::run(probe, "ssh").map_err(|e| TransportError::Connection(e.to_string()))?;
        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return Err(if stderr.contains("Permission denied") {
                TransportError::Authentication(stderr)
            } else {
                TransportError::Connection(format!(
                    "cannot reach {}: {}",
                    session.destination, stderr
                ))
            });
        }

        tracing::debug!(destination = %session.destination, "ssh session ready");
        self.session = Some(session);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        self.session = None;
        Ok(())
    }

    fn put(&mut self, source: &Path, destination: &str) -> Result<(), TransportError> {
        if !source.is_file() {
            return Err(TransportError::ResourceDoesNotExist(
                source.display().to_string(),
            ));
        }
        let session = self.session()?;
        let remote = remote_path(&session.basedir, destination);
        if let Some((parent, _)) = remote.rsplit_once('/') {
            self.remote_mkdir(session, parent)?;
        }

        let cmd = self.transfer_command(session, &[source.to_path_buf()], &remote, false);
        self.scp(cmd, source)
    }

    fn put_directory(&mut self, source: &Path, destination: &str) -> Result<(), TransportError> {
        if !source.is_dir() {
            return Err(TransportError::ResourceDoesNotExist(
                source.display().to_string(),
            ));
        }
        let session = self.session()?;
        let remote = remote_path(&session.basedir, destination);
        self.remote_mkdir(session, &remote)?;

        let entries = directory_entries(source)?;
        if entries.is_empty() {
            return Ok(());
        }

        let cmd = self.transfer_command(session, &entries, &remote, true);
        self.scp(cmd, source)
    }

    fn execute_command(&mut self, command: &str) -> Result<(), TransportError> {
        let session = self.session()?;
        let mut cmd = self.ssh_command(session);
        cmd.arg(command);
        let output = Self::run(cmd, command)?;
        if output.status.success() {
            return Ok(());
        }
        let exit_code = output.status.code();
        if exit_code == Some(SSH_CONNECTION_FAILURE) {
            tracing::debug!(command, "ssh itself failed while running command");
        }
        Err(TransportError::CommandFailed {
            command: command.to_string(),
            exit_code,
            stderr: Self::stderr_of(&output),
        })
    }
}

/// Join the repository base directory and a relative destination
fn remote_path(basedir: &str, destination: &str) -> String {
    let relative = destination.trim_start_matches("./").trim_start_matches('/');
    let base = basedir.trim_end_matches('/');
    if relative.is_empty() || relative == "." {
        if base.is_empty() {
            return basedir.to_string();
        }
        return base.to_string();
    }
    if basedir.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", base, relative)
    }
}

/// Top-level entries of `source`, sorted; any unreadable entry fails the transfer
fn directory_entries(source: &Path) -> Result<Vec<PathBuf>, TransportError> {
    let unreadable = |e: std::io::Error| {
        TransportError::TransferFailed(format!("cannot read {}: {}", source.display(), e))
    };
    let mut entries = std::fs::read_dir(source)
        .map_err(unreadable)?
        .map(|entry| entry.map(|e| e.path()).map_err(unreadable))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
