//! Error types for uploadfiles
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use thiserror::Error;

use crate::domain::ports::TransportError;
use crate::domain::services::LayoutError;

/// Result type alias for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Main error type for upload operations
#[derive(Error, Debug)]
pub enum UploadError {
    /// Missing or invalid settings, or server configuration that could not be bound
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// No transport registered for the repository's URL scheme
    #[error(
        "unsupported protocol '{protocol}' for deployment to {url}; \
         currently supported protocols are: {supported}"
    )]
    UnsupportedProtocol {
        protocol: String,
        url: String,
        supported: String,
    },

    /// Transport cannot copy directories
    #[error("transport protocol '{protocol}' doesn't support directory copying")]
    Capability { protocol: String },

    /// Connecting to (or disconnecting from) the repository failed
    #[error("{context}")]
    Connection {
        context: String,
        #[source]
        source: TransportError,
    },

    /// Transfer failed, resource missing, or access was refused
    #[error("{context}")]
    Transfer {
        context: String,
        #[source]
        source: TransportError,
    },

    /// A remote command failed in a phase that does not tolerate failures
    #[error("{message}")]
    CommandExecution {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// Plain artifact deployment was refused
    #[error("{message}")]
    Deployment { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl UploadError {
    /// Configuration error without an underlying transport cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

impl From<LayoutError> for UploadError {
    fn from(err: LayoutError) -> Self {
        Self::configuration(err.to_string())
    }
}
