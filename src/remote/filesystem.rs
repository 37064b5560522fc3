//! Remote host backed by bare repositories on the local filesystem.
//!
//! Used for `file://` base URLs: the clone URL of the descriptor is mapped to
//! a directory and a bare repository is initialised there. This makes the
//! whole workflow runnable without network access.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use git2::Repository;

use crate::repository::RepositoryDescriptor;

use super::RemoteHost;
use super::error::RemoteHostError;

/// Remote host that stores repositories as bare Git directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilesystemRemoteHost;

impl FilesystemRemoteHost {
    /// Location of the bare repository for `repository`.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the clone URL is not a
    /// `file://` URL or does not map to a UTF-8 path.
    pub fn bare_path(repository: &RepositoryDescriptor) -> Result<Utf8PathBuf, String> {
        let url = repository.remote_url();
        let path = url
            .to_file_path()
            .map_err(|()| format!("{url} is not a local file URL"))?;
        Utf8PathBuf::from_path_buf(path)
            .map_err(|path| format!("{} is not valid UTF-8", path.display()))
    }
}

fn ensure_vacant(path: &Utf8Path) -> Result<(), String> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => {
            let mut entries = dir
                .entries()
                .map_err(|error| format!("failed to read {path}: {error}"))?;
            if entries.next().is_some() {
                Err(format!("{path} already exists"))
            } else {
                Ok(())
            }
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(format!("failed to inspect {path}: {error}")),
    }
}

fn remove_bare(path: &Utf8Path) -> Result<(), String> {
    let (parent, leaf) = path
        .parent()
        .zip(path.file_name())
        .ok_or_else(|| format!("{path} has no parent directory"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| format!("failed to open {parent}: {error}"))?;
    dir.remove_dir_all(leaf)
        .map_err(|error| format!("failed to remove {path}: {error}"))
}

#[async_trait]
impl RemoteHost for FilesystemRemoteHost {
    async fn create_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        let full_name = repository.full_name();
        let path = Self::bare_path(repository)
            .map_err(|message| RemoteHostError::create(&full_name, message))?;
        ensure_vacant(&path).map_err(|message| RemoteHostError::create(&full_name, message))?;

        tracing::debug!(%path, "initialising bare repository");
        Repository::init_bare(path.as_std_path())
            .map(drop)
            .map_err(|error| RemoteHostError::create(&full_name, error.message()))
    }

    async fn delete_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        let full_name = repository.full_name();
        let path = Self::bare_path(repository)
            .map_err(|message| RemoteHostError::delete(&full_name, message))?;

        tracing::debug!(%path, "removing bare repository");
        remove_bare(&path).map_err(|message| RemoteHostError::delete(&full_name, message))
    }
}
