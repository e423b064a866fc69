//! uploadfiles - upload build output to a remote repository
//!
//! Uploads a file or directory tree to a repository URL through a transport
//! chosen by the URL scheme, runs remote commands before and after the
//! transfer, and fixes up permissions on the remote side.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{PlainDeployer, UploadOptions, UploadReport, UploadUseCase};
pub use config::{Config, Settings};
pub use domain::ports::{Capabilities, Transport, TransportError};
pub use domain::value_objects::{append_slash, Artifact, Repository};
pub use error::{UploadError, UploadResult};
pub use infrastructure::TransportRegistry;
