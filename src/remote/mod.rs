//! Remote host gateways.
//!
//! A [`RemoteHost`] creates and deletes the repository on the hosting
//! service. Three adapters are provided: the REST API through Octocrab, the
//! `gh` command-line client, and bare repositories on the local filesystem
//! for `file://` base URLs.

mod api;
mod backend;
mod client;
mod error;
mod error_mapping;
mod filesystem;
mod gh_cli;
mod token;

pub use api::OctocrabRemoteHost;
pub use backend::{RemoteBackend, connect};
pub use error::RemoteHostError;
pub use filesystem::FilesystemRemoteHost;
pub use gh_cli::GhCliRemoteHost;
pub use token::AccessToken;

use async_trait::async_trait;

use crate::repository::RepositoryDescriptor;

/// Gateway that can create and delete repositories on a hosting service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteHost: Send + Sync {
    /// Creates `repository.full_name()` with the requested visibility.
    async fn create_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError>;

    /// Deletes `repository.full_name()`.
    ///
    /// Only used to compensate for a failed workflow. Failures must be
    /// reported because the remote may still exist afterwards.
    async fn delete_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError>;
}
