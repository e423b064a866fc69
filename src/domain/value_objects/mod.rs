//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod artifact;
mod credentials;
mod permission;
mod remote_command;
mod repository;

pub use artifact::{Artifact, ArtifactMetadata};
pub use credentials::{AuthenticationInfo, ProxyInfo};
pub use permission::{PermissionChange, DEFAULT_CHMOD_MODE, DEFAULT_CHMOD_OPTIONS};
pub use remote_command::{RemoteCommand, IGNORE_FAILURE_MARKER};
pub use repository::{append_slash, Repository, RepositoryUrlError};
