//! Authentication and proxy details handed to a transport on connect.

use serde::{Deserialize, Serialize};

/// Credentials for a repository
///
/// Every field is optional; transports use what they understand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl AuthenticationInfo {
    /// True if no credential field is set
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.passphrase.is_none()
            && self.private_key.is_none()
    }
}

/// Proxy used to reach a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyInfo {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// Proxy protocol, e.g. `http` or `socks5`
    #[serde(default, rename = "protocol")]
    pub proxy_type: Option<String>,
    #[serde(default)]
    pub non_proxy_hosts: Option<String>,
    #[serde(default)]
    pub ntlm_domain: Option<String>,
    #[serde(default)]
    pub ntlm_host: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
