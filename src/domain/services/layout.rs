//! Repository Layout
//!
//! Maps artifacts and metadata to paths relative to a repository root.
//! `P2RepositoryLayout` keeps artifacts flat (`<artifactId>-<version>.<ext>`)
//! so an uploaded P2 update site stays browsable; `DefaultRepositoryLayout`
//! is the conventional nested layout.

use crate::domain::value_objects::{Artifact, ArtifactMetadata};

const PATH_SEPARATOR: char = '/';
const GROUP_SEPARATOR: char = '.';
const ARTIFACT_SEPARATOR: char = '-';

/// Layout errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("metadata for {group_id}:{artifact_id} has no base version")]
    MissingBaseVersion {
        group_id: String,
        artifact_id: String,
    },
    #[error("unknown repository layout '{0}' (expected 'p2' or 'default')")]
    UnknownLayout(String),
}

/// Maps artifacts to repository-relative paths
pub trait RepositoryLayout: Send + Sync {
    /// Layout id as used in configuration
    fn id(&self) -> &'static str;

    /// Path of an artifact file
    fn path_of(&self, artifact: &Artifact) -> String;

    /// Path of the metadata file in a local repository
    fn path_of_local_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError>;

    /// Path of the metadata file in a remote repository
    fn path_of_remote_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError>;
}

/// Look a layout up by id
pub fn layout_for(id: &str) -> Result<Box<dyn RepositoryLayout>, LayoutError> {
    match id {
        "p2" => Ok(Box::new(P2RepositoryLayout)),
        "default" => Ok(Box::new(DefaultRepositoryLayout)),
        other => Err(LayoutError::UnknownLayout(other.to_string())),
    }
}

fn format_as_directory(group_id: &str) -> String {
    group_id.replace(GROUP_SEPARATOR, &PATH_SEPARATOR.to_string())
}

/// `<artifactId>-<version>[-<classifier>][.<extension>]`
fn artifact_file_name(artifact: &Artifact) -> String {
    let mut name = format!(
        "{}{}{}",
        artifact.artifact_id, ARTIFACT_SEPARATOR, artifact.version
    );
    if let Some(classifier) = artifact.classifier() {
        name.push(ARTIFACT_SEPARATOR);
        name.push_str(classifier);
    }
    if !artifact.extension.is_empty() {
        name.push(GROUP_SEPARATOR);
        name.push_str(&artifact.extension);
    }
    name
}

/// Flat layout for P2 update sites
#[derive(Debug, Clone, Copy, Default)]
pub struct P2RepositoryLayout;

impl P2RepositoryLayout {
    fn path_of_repository_metadata(
        metadata: &ArtifactMetadata,
        filename: &str,
    ) -> Result<String, LayoutError> {
        let mut path = format_as_directory(&metadata.group_id);
        path.push(PATH_SEPARATOR);

        if !metadata.stored_in_group_directory {
            // Always nested under the version, unlike the default layout.
            let version =
                metadata
                    .base_version
                    .as_deref()
                    .ok_or_else(|| LayoutError::MissingBaseVersion {
                        group_id: metadata.group_id.clone(),
                        artifact_id: metadata.artifact_id.clone(),
                    })?;
            path.push_str(version);
            path.push(PATH_SEPARATOR);
            path.push_str(&metadata.artifact_id);
            path.push(PATH_SEPARATOR);
        }

        path.push_str(filename);
        Ok(path)
    }
}

impl RepositoryLayout for P2RepositoryLayout {
    fn id(&self) -> &'static str {
        "p2"
    }

    fn path_of(&self, artifact: &Artifact) -> String {
        artifact_file_name(artifact)
    }

    fn path_of_local_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError> {
        Self::path_of_repository_metadata(metadata, &metadata.local_filename)
    }

    fn path_of_remote_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError> {
        Self::path_of_repository_metadata(metadata, &metadata.remote_filename)
    }
}

/// Conventional `<group>/<artifactId>/<baseVersion>/<file>` layout
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRepositoryLayout;

impl DefaultRepositoryLayout {
    fn path_of_repository_metadata(metadata: &ArtifactMetadata, filename: &str) -> String {
        let mut path = format_as_directory(&metadata.group_id);
        path.push(PATH_SEPARATOR);
        if !metadata.stored_in_group_directory {
            path.push_str(&metadata.artifact_id);
            path.push(PATH_SEPARATOR);
            if let Some(version) = metadata.base_version.as_deref() {
                path.push_str(version);
                path.push(PATH_SEPARATOR);
            }
        }
        path.push_str(filename);
        path
    }
}

impl RepositoryLayout for DefaultRepositoryLayout {
    fn id(&self) -> &'static str {
        "default"
    }

    fn path_of(&self, artifact: &Artifact) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            format_as_directory(&artifact.group_id),
            artifact.artifact_id,
            artifact.base_version(),
            artifact_file_name(artifact),
            sep = PATH_SEPARATOR
        )
    }

    fn path_of_local_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError> {
        Ok(Self::path_of_repository_metadata(
            metadata,
            &metadata.local_filename,
        ))
    }

    fn path_of_remote_repository_metadata(
        &self,
        metadata: &ArtifactMetadata,
    ) -> Result<String, LayoutError> {
        Ok(Self::path_of_repository_metadata(
            metadata,
            &metadata.remote_filename,
        ))
    }
}
