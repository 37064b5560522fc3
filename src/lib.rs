//! Scaffold library crate: create a hosted repository and its local working
//! copy as a single unit.
//!
//! The workflow creates the remote repository, prepares the target directory
//! and clones (or initialises and pushes) into it. When the local half fails,
//! the steps that already succeeded are undone in reverse order and the
//! original failure is reported alongside any cleanup that did not succeed.
//!
//! Remote hosting and local Git access sit behind the [`RemoteHost`] and
//! [`LocalVcs`] traits so callers can supply their own adapters.

pub mod config;
pub mod local;
pub mod remote;
pub mod repository;
pub mod workflow;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConfigError, ScaffoldConfig};
pub use local::{Git2Vcs, LocalError, LocalSetup, LocalVcs};
pub use remote::{AccessToken, RemoteBackend, RemoteHost, RemoteHostError};
pub use repository::{RepositoryDescriptor, ValidationError, Visibility};
pub use workflow::{
    CreateRepository, CreateRepositoryError, CreateRepositoryRequest, WorkflowStage,
    create_repository,
};
