//! Repository value object - the destination of an upload.

use percent_encoding::percent_decode_str;
use url::Url;

/// Make sure the given url ends with a slash.
///
/// Returns `url` unchanged if it already ends with `/`, otherwise appends one.
pub fn append_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Error when a repository URL cannot be understood
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid repository url '{url}': {reason}")]
pub struct RepositoryUrlError {
    pub url: String,
    pub reason: String,
}

/// Destination repository descriptor
///
/// The URL is normalised to end with `/` so relative target paths
/// resolve inside the repository rather than next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    id: String,
    url: Url,
}

impl Repository {
    /// Create a repository from its id and base URL
    pub fn new(id: impl Into<String>, url: &str) -> Result<Self, RepositoryUrlError> {
        let normalised = append_slash(url.trim());
        let parsed = Url::parse(&normalised).map_err(|e| RepositoryUrlError {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            id: id.into(),
            url: parsed,
        })
    }

    /// Repository id, used to look up server settings
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base URL (always ends with `/`)
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// URL scheme, which selects the transport
    pub fn protocol(&self) -> &str {
        self.url.scheme()
    }

    /// Remote host, if the URL has one
    pub fn host(&self) -> Option<&str> {
        self.url.host_str().filter(|h| !h.is_empty())
    }

    /// Explicit port from the URL
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// User name embedded in the URL (`scp://deploy@host/...`)
    pub fn username(&self) -> Option<&str> {
        Some(self.url.username()).filter(|u| !u.is_empty())
    }

    /// Base directory on the remote side, percent-decoded
    pub fn basedir(&self) -> String {
        if self.url.scheme() == "file" {
            if let Ok(path) = self.url.to_file_path() {
                return append_slash(&path.to_string_lossy());
            }
        }
        percent_decode_str(self.url.path())
            .decode_utf8_lossy()
            .into_owned()
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}
