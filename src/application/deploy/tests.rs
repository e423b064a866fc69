//! Plain Deployer Tests

use super::*;
use crate::config::{RepositoryConfig, ServerSettings, Settings};
use crate::domain::ports::{Capabilities, Transport, TransportError};
use crate::domain::services::{DefaultRepositoryLayout, P2RepositoryLayout};
use crate::domain::value_objects::{Artifact, AuthenticationInfo, ProxyInfo, Repository};
use crate::error::UploadError;
use crate::infrastructure::TransportRegistry;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn repository(id: &str, url: &str) -> RepositoryConfig {
    RepositoryConfig {
        id: id.to_string(),
        url: url.to_string(),
        authentication: None,
        proxy: None,
    }
}

fn file_repository(dir: &Path) -> RepositoryConfig {
    repository("local", &format!("file://{}", dir.display()))
}

/// What a `connect` call was handed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ConnectRecord {
    url: String,
    username: Option<String>,
    proxy_host: Option<String>,
}

struct RecordingTransport {
    connects: Arc<Mutex<Vec<ConnectRecord>>>,
}

impl Transport for RecordingTransport {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            directory_copy: true,
            command_execution: false,
        }
    }

    fn connect(
        &mut self,
        repository: &Repository,
        authentication: Option<&AuthenticationInfo>,
        proxy: Option<&ProxyInfo>,
    ) -> Result<(), TransportError> {
        self.connects.lock().unwrap().push(ConnectRecord {
            url: repository.url().to_string(),
            username: authentication.and_then(|a| a.username.clone()),
            proxy_host: proxy.map(|p| p.host.clone()),
        });
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn put(&mut self, _source: &Path, _destination: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn put_directory(&mut self, _source: &Path, _destination: &str) -> Result<(), TransportError> {
        Ok(())
    }
}

fn recording_deployer(settings: Settings) -> (PlainDeployer, Arc<Mutex<Vec<ConnectRecord>>>) {
    let connects = Arc::new(Mutex::new(Vec::new()));
    let factory_connects = Arc::clone(&connects);
    let mut registry = TransportRegistry::new();
    registry.register("http", move || {
        Box::new(RecordingTransport {
            connects: Arc::clone(&factory_connects),
        }) as Box<dyn Transport>
    });
    let deployer = PlainDeployer::new(registry, settings, Box::new(P2RepositoryLayout));
    (deployer, connects)
}

fn deploy_settings() -> Settings {
    Settings {
        servers: vec![ServerSettings {
            id: "releases".to_string(),
            username: Some("settings-user".to_string()),
            ..ServerSettings::default()
        }],
    }
}

#[test]
fn offline_deploy_is_refused_before_transport_lookup() {
    let deployer = PlainDeployer::new(
        TransportRegistry::new(),
        Settings::default(),
        Box::new(P2RepositoryLayout),
    );
    let artifact = Artifact::new("eu.example", "site", "1.0").with_extension("zip");
    let repository = repository("remote", "gopher://example.org/");

    let err = deployer
        .deploy(
            std::path::Path::new("site-1.0.zip"),
            &artifact,
            &repository,
            false,
        )
        .unwrap_err();

    match err {
        UploadError::Deployment { message } => assert_eq!(
            message,
            "system is offline. Cannot deploy artifact: eu.example:site:zip:1.0"
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deploys_to_p2_layout_path() {
    let build = tempdir().unwrap();
    let repo = tempdir().unwrap();
    fs::write(build.path().join("site-1.0.zip"), b"zip").unwrap();

    let deployer = PlainDeployer::with_layout_id(
        TransportRegistry::with_defaults(),
        Settings::default(),
        "p2",
    )
    .unwrap();
    let artifact = Artifact::new("eu.example", "site", "1.0").with_extension("zip");

    let report = deployer
        .deploy_named(
            build.path(),
            "site-1.0",
            &artifact,
            &file_repository(repo.path()),
            true,
        )
        .unwrap();

    assert_eq!(report.path, "site-1.0.zip");
    assert_eq!(report.layout, "p2");
    assert_eq!(fs::read(repo.path().join("site-1.0.zip")).unwrap(), b"zip");
}

#[test]
fn deploys_to_nested_default_layout_path() {
    let build = tempdir().unwrap();
    let repo = tempdir().unwrap();
    let source = build.path().join("lib.jar");
    fs::write(&source, b"jar").unwrap();

    let deployer = PlainDeployer::new(
        TransportRegistry::with_defaults(),
        Settings::default(),
        Box::new(DefaultRepositoryLayout),
    );
    let artifact = Artifact::new("eu.example", "lib", "2.1");

    let report = deployer
        .deploy(&source, &artifact, &file_repository(repo.path()), true)
        .unwrap();

    assert_eq!(report.path, "eu/example/lib/2.1/lib-2.1.jar");
    assert!(repo.path().join("eu/example/lib/2.1/lib-2.1.jar").is_file());
    assert!(report.disconnect_error.is_none());
}

#[test]
fn unknown_scheme_is_unsupported_protocol() {
    let build = tempdir().unwrap();
    let source = build.path().join("lib.jar");
    fs::write(&source, b"jar").unwrap();

    let deployer = PlainDeployer::new(
        TransportRegistry::with_defaults(),
        Settings::default(),
        Box::new(DefaultRepositoryLayout),
    );
    let repository = repository("remote", "dav://example.org/repo");

    let err = deployer
        .deploy(&source, &Artifact::new("g", "lib", "1"), &repository, true)
        .unwrap_err();
    assert!(matches!(err, UploadError::UnsupportedProtocol { .. }));
}

#[test]
fn missing_source_is_transfer_error() {
    let build = tempdir().unwrap();
    let repo = tempdir().unwrap();

    let deployer = PlainDeployer::new(
        TransportRegistry::with_defaults(),
        Settings::default(),
        Box::new(P2RepositoryLayout),
    );
    let err = deployer
        .deploy_named(
            build.path(),
            "missing",
            &Artifact::new("g", "a", "1"),
            &file_repository(repo.path()),
            true,
        )
        .unwrap_err();
    assert!(matches!(err, UploadError::Transfer { .. }));
}

#[test]
fn unknown_layout_id_is_configuration_error() {
    let result = PlainDeployer::with_layout_id(
        TransportRegistry::with_defaults(),
        Settings::default(),
        "flat",
    );
    assert!(matches!(result, Err(UploadError::Configuration { .. })));
}

#[test]
fn repository_authentication_and_proxy_reach_connect() {
    let (deployer, connects) = recording_deployer(deploy_settings());
    let mut releases = repository("releases", "http://example.org/repo");
    releases.authentication = Some(AuthenticationInfo {
        username: Some("ci".to_string()),
        ..AuthenticationInfo::default()
    });
    releases.proxy = Some(ProxyInfo {
        host: "proxy.example.org".to_string(),
        ..ProxyInfo::default()
    });

    deployer
        .deploy(
            Path::new("a-1.jar"),
            &Artifact::new("g", "a", "1"),
            &releases,
            true,
        )
        .unwrap();

    assert_eq!(
        connects.lock().unwrap().clone(),
        vec![ConnectRecord {
            url: "http://example.org/repo/".to_string(),
            username: Some("ci".to_string()),
            proxy_host: Some("proxy.example.org".to_string()),
        }]
    );
}

#[test]
fn settings_authentication_is_the_fallback() {
    let (deployer, connects) = recording_deployer(deploy_settings());

    deployer
        .deploy(
            Path::new("a-1.jar"),
            &Artifact::new("g", "a", "1"),
            &repository("releases", "http://example.org/repo/"),
            true,
        )
        .unwrap();

    let connects = connects.lock().unwrap();
    assert_eq!(connects.len(), 1);
    assert_eq!(connects[0].username.as_deref(), Some("settings-user"));
    assert_eq!(connects[0].proxy_host, None);
}
