//! Deploy Result

use std::path::PathBuf;

use serde::Serialize;

/// Result of deploying one artifact
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    /// `group:artifact:ext[:classifier]:version`
    pub artifact: String,
    pub source: PathBuf,
    /// Layout path the file was stored at
    pub path: String,
    pub repository_url: String,
    pub layout: String,
    pub disconnect_error: Option<String>,
}
