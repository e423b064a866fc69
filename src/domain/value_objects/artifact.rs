//! Artifact coordinates and repository metadata descriptors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A build artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Version without snapshot timestamp; defaults to `version`
    #[serde(default)]
    pub base_version: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// File produced by the build
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_extension() -> String {
    "jar".to_string()
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            base_version: None,
            classifier: None,
            extension: default_extension(),
            file: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Classifier, if set and non-empty
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    pub fn base_version(&self) -> &str {
        self.base_version.as_deref().unwrap_or(&self.version)
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if let Some(classifier) = self.classifier() {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

/// Repository metadata file attached to an artifact or group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub base_version: Option<String>,
    /// Group-level metadata lives directly in the group directory
    pub stored_in_group_directory: bool,
    pub local_filename: String,
    pub remote_filename: String,
}

impl ArtifactMetadata {
    /// Artifact-level `maven-metadata.xml` for `artifact`
    pub fn for_artifact(artifact: &Artifact, repository_id: &str) -> Self {
        Self {
            group_id: artifact.group_id.clone(),
            artifact_id: artifact.artifact_id.clone(),
            base_version: Some(artifact.base_version().to_string()),
            stored_in_group_directory: false,
            local_filename: format!("maven-metadata-{}.xml", repository_id),
            remote_filename: "maven-metadata.xml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_classifier() {
        let artifact = Artifact::new("eu.example", "site", "1.0").with_classifier("p2");
        assert_eq!(artifact.to_string(), "eu.example:site:jar:p2:1.0");
    }

    #[test]
    fn empty_classifier_is_absent() {
        let artifact = Artifact::new("g", "a", "1").with_classifier("");
        assert_eq!(artifact.classifier(), None);
    }

    #[test]
    fn base_version_defaults_to_version() {
        let artifact = Artifact::new("g", "a", "1.0-SNAPSHOT");
        assert_eq!(artifact.base_version(), "1.0-SNAPSHOT");
    }

    #[test]
    fn metadata_for_artifact_uses_repository_id() {
        let artifact = Artifact::new("g", "a", "1");
        let metadata = ArtifactMetadata::for_artifact(&artifact, "central");
        assert_eq!(metadata.local_filename, "maven-metadata-central.xml");
        assert_eq!(metadata.remote_filename, "maven-metadata.xml");
        assert_eq!(metadata.base_version.as_deref(), Some("1"));
    }
}
