//! Plain Deployer
//!
//! Deploys a single artifact file to the path its repository layout gives it.

use std::path::{Path, PathBuf};

use crate::application::upload::{
    acquire_transport, apply_server_config, disconnect_quietly, resolve_credentials,
    resolve_repository,
};
use crate::config::{RepositoryConfig, Settings};
use crate::domain::services::{layout_for, RepositoryLayout};
use crate::domain::value_objects::Artifact;
use crate::error::{UploadError, UploadResult};
use crate::infrastructure::TransportRegistry;

use super::result::DeployReport;

/// Deploys artifacts without any metadata handling
pub struct PlainDeployer {
    registry: TransportRegistry,
    settings: Settings,
    layout: Box<dyn RepositoryLayout>,
}

impl PlainDeployer {
    pub fn new(
        registry: TransportRegistry,
        settings: Settings,
        layout: Box<dyn RepositoryLayout>,
    ) -> Self {
        Self {
            registry,
            settings,
            layout,
        }
    }

    /// Deployer using the layout registered under `layout_id`
    pub fn with_layout_id(
        registry: TransportRegistry,
        settings: Settings,
        layout_id: &str,
    ) -> UploadResult<Self> {
        Ok(Self::new(registry, settings, layout_for(layout_id)?))
    }

    pub fn layout(&self) -> &dyn RepositoryLayout {
        self.layout.as_ref()
    }

    /// Deploy `<basedir>/<final_name>.<extension>`
    pub fn deploy_named(
        &self,
        basedir: &Path,
        final_name: &str,
        artifact: &Artifact,
        repository: &RepositoryConfig,
        online: bool,
    ) -> UploadResult<DeployReport> {
        let source = named_source(basedir, final_name, &artifact.extension);
        self.deploy(&source, artifact, repository, online)
    }

    /// Store `source` in `repository` at the layout path of `artifact`
    ///
    /// Credentials are resolved the same way as for an upload.
    pub fn deploy(
        &self,
        source: &Path,
        artifact: &Artifact,
        repo_config: &RepositoryConfig,
        online: bool,
    ) -> UploadResult<DeployReport> {
        if !online {
            return Err(UploadError::Deployment {
                message: format!("system is offline. Cannot deploy artifact: {}", artifact),
            });
        }

        let path = self.layout.path_of(artifact);
        let repository = resolve_repository(repo_config)?;
        let mut handle = acquire_transport(&self.registry, &repository)?;
        apply_server_config(&self.settings, &mut handle, repository.id())?;
        let (authentication, proxy) =
            resolve_credentials(&self.settings, repo_config, &repository);

        tracing::info!("deploying {} to {}{}", artifact, repository.url(), path);
        let outcome = handle
            .transport_mut()
            .connect(&repository, authentication.as_ref(), proxy.as_ref())
            .map_err(|e| UploadError::Connection {
                context: format!("cannot connect to {}", repository.url()),
                source: e,
            })
            .and_then(|()| {
                handle
                    .transport_mut()
                    .put(source, &path)
                    .map_err(|e| UploadError::Transfer {
                        context: format!("error deploying {}", source.display()),
                        source: e,
                    })
            });
        let disconnect_error = disconnect_quietly(&mut handle);
        outcome?;

        Ok(DeployReport {
            artifact: artifact.to_string(),
            source: source.to_path_buf(),
            path,
            repository_url: repository.url().to_string(),
            layout: self.layout.id().to_string(),
            disconnect_error,
        })
    }
}

fn named_source(basedir: &Path, final_name: &str, extension: &str) -> PathBuf {
    if extension.is_empty() {
        basedir.join(final_name)
    } else {
        basedir.join(format!("{}.{}", final_name, extension))
    }
}
