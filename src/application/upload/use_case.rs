//! Upload Use Case
//!
//! Orchestrates one upload session:
//! 1. Resolve source and target path
//! 2. Acquire a transport for the repository's URL scheme
//! 3. Apply server configuration from the user settings
//! 4. Connect, run pre-commands, transfer, run post-commands, chmod
//! 5. Disconnect, whatever happened before

use crate::config::{RepositoryConfig, Settings};
use crate::domain::ports::{Capabilities, Transport};
use crate::domain::value_objects::{
    append_slash, Artifact, AuthenticationInfo, PermissionChange, ProxyInfo, Repository,
};
use crate::error::{UploadError, UploadResult};
use crate::infrastructure::TransportRegistry;

use super::commands::run_command_phase;
use super::options::{TransferRequest, UploadOptions};
use super::result::{CommandPhase, UploadReport, UploadState};

/// A transport acquired for one upload, with its capabilities resolved once
pub struct TransportHandle {
    transport: Box<dyn Transport>,
    protocol: String,
    capabilities: Capabilities,
}

impl TransportHandle {
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn transport_mut(&mut self) -> &mut dyn Transport {
        self.transport.as_mut()
    }
}

/// Build the `Repository` for a configured entry, normalising its URL
pub fn resolve_repository(repo_config: &RepositoryConfig) -> UploadResult<Repository> {
    Repository::new(&repo_config.id, &append_slash(&repo_config.url))
        .map_err(|e| UploadError::configuration(e.to_string()))
}

/// Authentication and proxy used to connect to `repository`
///
/// The repository entry's own `authentication` wins; otherwise the user
/// settings server with the same id supplies it. The proxy only comes from
/// the repository entry.
pub fn resolve_credentials(
    settings: &Settings,
    repo_config: &RepositoryConfig,
    repository: &Repository,
) -> (Option<AuthenticationInfo>, Option<ProxyInfo>) {
    let authentication = repo_config.authentication.clone().or_else(|| {
        settings
            .server(repository.id())
            .and_then(|server| server.authentication())
    });
    tracing::debug!(
        "authentication info with id '{}': {}",
        repository.id(),
        authentication
            .as_ref()
            .and_then(|a| a.username.as_deref())
            .unwrap_or("-")
    );
    let proxy = repo_config.proxy.clone();
    tracing::debug!(
        "proxy info with id '{}': {}",
        repository.id(),
        proxy.as_ref().map(|p| p.host.as_str()).unwrap_or("-")
    );
    (authentication, proxy)
}

/// Look up a transport for the repository's scheme
///
/// Fails when the scheme is not registered or the transport cannot copy
/// directories; nothing is connected yet in either case.
pub fn acquire_transport(
    registry: &TransportRegistry,
    repository: &Repository,
) -> UploadResult<TransportHandle> {
    let protocol = repository.protocol().to_string();

    let Some(transport) = registry.create(&protocol) else {
        let err = UploadError::UnsupportedProtocol {
            protocol,
            url: repository.url().to_string(),
            supported: registry.supported_protocols(),
        };
        tracing::error!("{}", err);
        tracing::error!("protocols may be added by registering a transport");
        return Err(err);
    };

    let capabilities = transport.capabilities();
    if !capabilities.directory_copy {
        return Err(UploadError::Capability { protocol });
    }

    Ok(TransportHandle {
        transport,
        protocol,
        capabilities,
    })
}

/// Apply the `configuration` table of every server entry matching `server_id`
pub fn apply_server_config(
    settings: &Settings,
    handle: &mut TransportHandle,
    server_id: &str,
) -> UploadResult<()> {
    tracing::debug!("configuring transport");
    for server in &settings.servers {
        tracing::debug!("configuring transport: server {}", server.id);
        if server.id != server_id {
            continue;
        }
        let Some(configuration) = &server.configuration else {
            continue;
        };
        handle
            .transport
            .configure(configuration)
            .map_err(|e| UploadError::Configuration {
                message: format!(
                    "while configuring transport for '{}': unable to apply transport configuration",
                    server_id
                ),
                source: Some(e),
            })?;
    }
    Ok(())
}

/// Disconnect, logging a failure instead of returning it
pub(crate) fn disconnect_quietly(handle: &mut TransportHandle) -> Option<String> {
    match handle.transport.disconnect() {
        Ok(()) => None,
        Err(err) => {
            tracing::error!(error = %err, "error disconnecting transport - ignored");
            Some(err.to_string())
        }
    }
}

/// Upload use case - orchestrates the upload flow
pub struct UploadUseCase {
    registry: TransportRegistry,
    settings: Settings,
}

impl UploadUseCase {
    pub fn new(registry: TransportRegistry, settings: Settings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &TransportRegistry {
        &self.registry
    }

    /// Execute the upload
    ///
    /// `skip` returns before the registry is consulted.
    pub fn execute(
        &self,
        options: &UploadOptions,
        repository: Option<&RepositoryConfig>,
        artifact: Option<&Artifact>,
    ) -> UploadResult<UploadReport> {
        if options.skip {
            tracing::info!("skipping upload");
            return Ok(UploadReport::skipped());
        }

        let mut report = UploadReport::new();
        report.enter(UploadState::Configuring);

        let request = self.prepare_request(options, repository, artifact)?;
        report.source = Some(request.source.clone());
        report.target_path = Some(request.target_path.clone());
        report.repository_url = Some(request.repository.url().to_string());

        let mut handle = self.acquire_transport(&request.repository)?;
        report.protocol = Some(handle.protocol().to_string());
        self.apply_server_config(&mut handle, request.repository.id())?;

        tracing::info!(
            "uploading '{}' to '{}' @ {}",
            request.source.display(),
            request.target_path,
            request.repository.url()
        );
        self.run_session(handle, &request, options, report)
    }

    /// Resolve source, target path, repository and credentials
    pub fn prepare_request(
        &self,
        options: &UploadOptions,
        repository: Option<&RepositoryConfig>,
        artifact: Option<&Artifact>,
    ) -> UploadResult<TransferRequest> {
        let source = options.resolve_source(artifact)?;
        let target_path = options.resolve_target_path(&source);

        let repo_config = repository
            .ok_or_else(|| UploadError::configuration("no destination repository configured"))?;
        let repository = resolve_repository(repo_config)?;
        let (authentication, proxy) =
            resolve_credentials(&self.settings, repo_config, &repository);

        Ok(TransferRequest {
            source,
            repository,
            target_path,
            authentication,
            proxy,
        })
    }

    /// Look up a directory-capable transport for the repository's scheme
    pub fn acquire_transport(&self, repository: &Repository) -> UploadResult<TransportHandle> {
        acquire_transport(&self.registry, repository)
    }

    /// Bind the matching server's `configuration` table onto the transport
    pub fn apply_server_config(
        &self,
        handle: &mut TransportHandle,
        server_id: &str,
    ) -> UploadResult<()> {
        apply_server_config(&self.settings, handle, server_id)
    }

    /// Run the session and always disconnect afterwards
    ///
    /// A disconnect failure is logged and recorded; it never replaces the
    /// session's own outcome.
    pub fn run_session(
        &self,
        mut handle: TransportHandle,
        request: &TransferRequest,
        options: &UploadOptions,
        mut report: UploadReport,
    ) -> UploadResult<UploadReport> {
        let outcome = Self::run_connected(&mut handle, request, options, &mut report);

        report.enter(UploadState::Disconnecting);
        report.disconnect_error = disconnect_quietly(&mut handle);

        match outcome {
            Ok(()) => {
                report.enter(UploadState::Done);
                tracing::info!("upload finished");
                Ok(report)
            }
            Err(err) => {
                report.enter(UploadState::Failed);
                Err(err)
            }
        }
    }

    fn run_connected(
        handle: &mut TransportHandle,
        request: &TransferRequest,
        options: &UploadOptions,
        report: &mut UploadReport,
    ) -> UploadResult<()> {
        handle
            .transport
            .connect(
                &request.repository,
                request.authentication.as_ref(),
                request.proxy.as_ref(),
            )
            .map_err(|e| UploadError::Connection {
                context: format!(
                    "error uploading {}: cannot connect to {}",
                    request.source.display(),
                    request.repository.url()
                ),
                source: e,
            })?;
        report.enter(UploadState::Connected);

        report.enter(UploadState::PreCommands);
        let pre = run_command_phase(
            handle,
            CommandPhase::Pre,
            &options.pre_commands,
            options.fail_on_pre_command_errors,
        );
        let pre_succeeded = pre.succeeded;
        report.record_phase(pre);
        if !pre_succeeded && options.fail_on_pre_command_errors {
            return Err(Self::abort(CommandPhase::Pre));
        }

        report.enter(UploadState::Transferring);
        report.directory = request.source.is_dir();
        let transferred = if report.directory {
            handle
                .transport
                .put_directory(&request.source, &request.target_path)
        } else {
            handle.transport.put(&request.source, &request.target_path)
        };
        transferred.map_err(|e| UploadError::Transfer {
            context: format!("error uploading {}", request.source.display()),
            source: e,
        })?;

        report.enter(UploadState::PostCommands);
        let post = run_command_phase(
            handle,
            CommandPhase::Post,
            &options.post_commands,
            options.fail_on_post_command_errors,
        );
        let post_succeeded = post.succeeded;
        report.record_phase(post);
        if !post_succeeded && options.fail_on_post_command_errors {
            return Err(Self::abort(CommandPhase::Post));
        }

        if options.permission_change.enabled {
            report.enter(UploadState::Chmod);
            report.chmod_applied = Self::apply_permissions(
                handle,
                &options.permission_change,
                &request.repository.basedir(),
            )?;
        }

        Ok(())
    }

    /// Run `chmod` on the repository base directory
    ///
    /// Transports without command execution are skipped; returns whether
    /// the command ran.
    pub fn apply_permissions(
        handle: &mut TransportHandle,
        permission_change: &PermissionChange,
        basedir: &str,
    ) -> UploadResult<bool> {
        if !handle.capabilities.command_execution {
            tracing::debug!(
                protocol = handle.protocol(),
                "transport cannot execute commands; skipping chmod"
            );
            return Ok(false);
        }

        let command = permission_change.command_for(basedir);
        tracing::info!("{}", command);
        handle
            .transport
            .execute_command(&command)
            .map_err(|e| UploadError::CommandExecution {
                message: format!("error applying permissions to {}", basedir),
                source: Some(e),
            })?;
        Ok(true)
    }

    fn abort(phase: CommandPhase) -> UploadError {
        tracing::error!("aborting due to previous errors");
        UploadError::CommandExecution {
            message: format!("aborting due to previous errors in {}-commands", phase),
            source: None,
        }
    }
}
