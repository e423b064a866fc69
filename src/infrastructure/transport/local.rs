//! Local Transport
//!
//! Implements the Transport port for `file://` repositories by copying into
//! a directory on the local disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{Capabilities, Transport, TransportError};
use crate::domain::value_objects::{AuthenticationInfo, ProxyInfo, Repository};

/// Transport that copies into a local directory
///
/// Files are written through a temporary sibling and renamed into place.
/// Cannot execute commands.
#[derive(Debug, Default)]
pub struct LocalTransport {
    /// Repository base directory while connected
    basedir: Option<PathBuf>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn basedir(&self) -> Result<&Path, TransportError> {
        self.basedir
            .as_deref()
            .ok_or_else(|| TransportError::Connection("not connected".to_string()))
    }

    fn destination_path(&self, destination: &str) -> Result<PathBuf, TransportError> {
        let base = self.basedir()?;
        let relative = destination.trim_start_matches('/');
        if relative.is_empty() || relative == "." {
            Ok(base.to_path_buf())
        } else {
            Ok(base.join(relative))
        }
    }

    /// Copy one file through a temp file in the target directory
    fn copy_file(source: &Path, target: &Path) -> io::Result<()> {
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut input = fs::File::open(source)?;
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        io::copy(&mut input, staged.as_file_mut())?;
        staged.persist(target).map_err(|e| e.error)?;
        // Temp files are created owner-only; keep the source's mode instead.
        fs::set_permissions(target, input.metadata()?.permissions())?;
        Ok(())
    }

    fn transfer_failed(path: &Path, err: io::Error) -> TransportError {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                TransportError::Authorization(format!("{}: {}", path.display(), err))
            }
            _ => TransportError::TransferFailed(format!("{}: {}", path.display(), err)),
        }
    }
}

impl Transport for LocalTransport {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            directory_copy: true,
            command_execution: false,
        }
    }

    fn connect(
        &mut self,
        repository: &Repository,
        _authentication: Option<&AuthenticationInfo>,
        _proxy: Option<&ProxyInfo>,
    ) -> Result<(), TransportError> {
        if repository.protocol() != "file" {
            return Err(TransportError::Connection(format!(
                "local transport cannot reach {}",
                repository.url()
            )));
        }
        let basedir = PathBuf::from(repository.basedir());
        fs::create_dir_all(&basedir).map_err(|e| {
            TransportError::Connection(format!("{}: {}", basedir.display(), e))
        })?;
        tracing::debug!(basedir = %basedir.display(), "local transport connected");
        self.basedir = Some(basedir);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        self.basedir = None;
        Ok(())
    }

    fn put(&mut self, source: &Path, destination: &str) -> Result<(), TransportError> {
        if !source.is_file() {
            return Err(TransportError::ResourceDoesNotExist(
                source.display().to_string(),
            ));
        }
        let target = self.destination_path(destination)?;
        tracing::debug!(source = %source.display(), target = %target.display(), "copying file");
        Self::copy_file(source, &target).map_err(|e| Self::transfer_failed(&target, e))
    }

    fn put_directory(&mut self, source: &Path, destination: &str) -> Result<(), TransportError> {
        if !source.is_dir() {
            return Err(TransportError::ResourceDoesNotExist(
                source.display().to_string(),
            ));
        }
        let target_root = self.destination_path(destination)?;
        fs::create_dir_all(&target_root).map_err(|e| Self::transfer_failed(&target_root, e))?;

        let walker = WalkBuilder::new(source)
            .standard_filters(false)
            .follow_links(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| TransportError::TransferFailed(e.to_string()))?;
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(source) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            let target = target_root.join(relative);
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                fs::create_dir_all(&target).map_err(|e| Self::transfer_failed(&target, e))?;
            } else {
                tracing::trace!(target = %target.display(), "copying file");
                Self::copy_file(path, &target).map_err(|e| Self::transfer_failed(&target, e))?;
            }
        }
        Ok(())
    }
}
