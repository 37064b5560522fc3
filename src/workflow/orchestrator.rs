//! Sequencing of remote creation and local materialisation with rollback.

use camino::Utf8PathBuf;
use tracing::{info, warn};

use crate::local::{
    LocalVcs, MaterializeFailure, inspect_target, materialize_local_copy, remove_directory,
};
use crate::remote::RemoteHost;
use crate::repository::RepositoryDescriptor;

use super::error::{CleanupFailure, CreateRepositoryError};
use super::request::CreateRepositoryRequest;
use super::stage::WorkflowStage;

/// Undo action for a side effect that already succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Compensation {
    /// Remove a directory this run created.
    RemoveDirectory(Utf8PathBuf),
    /// Delete the remote repository this run created.
    DeleteRemote,
}

/// Creates a remote repository and its local working copy as one unit.
///
/// If populating the working copy fails, the steps that succeeded are undone
/// in reverse order: a directory created by this run is removed, then the
/// remote repository is deleted. Directories that existed beforehand are
/// never removed.
#[derive(Debug)]
pub struct CreateRepository<'a, R: ?Sized, V: ?Sized> {
    remote: &'a R,
    vcs: &'a V,
}

impl<'a, R, V> CreateRepository<'a, R, V>
where
    R: RemoteHost + ?Sized,
    V: LocalVcs + ?Sized,
{
    /// Creates a workflow over the given gateways.
    pub const fn new(remote: &'a R, vcs: &'a V) -> Self {
        Self { remote, vcs }
    }

    /// Runs the workflow for `request`.
    ///
    /// The target directory is checked before the remote is created, so a
    /// non-empty or unreachable target fails without any side effect.
    ///
    /// # Errors
    ///
    /// Returns a [`CreateRepositoryError`] carrying the primary cause and any
    /// compensating actions that failed.
    pub async fn run(
        &self,
        request: &CreateRepositoryRequest,
    ) -> Result<RepositoryDescriptor, CreateRepositoryError> {
        let repository = request
            .descriptor()
            .map_err(|error| CreateRepositoryError::new(WorkflowStage::Start, error))?;
        let full_name = repository.full_name();
        let directory = repository.directory();

        inspect_target(directory)
            .map_err(|error| CreateRepositoryError::new(WorkflowStage::Start, error))?;

        let mut compensations = Vec::new();
        self.remote
            .create_remote(&repository)
            .await
            .map_err(|error| CreateRepositoryError::new(WorkflowStage::Start, error))?;
        compensations.push(Compensation::DeleteRemote);
        let mut stage = WorkflowStage::RemoteCreated;
        info!(%full_name, %stage, "remote repository created");

        match materialize_local_copy(self.vcs, &repository, &request.setup) {
            Ok(state) => {
                stage = WorkflowStage::LocalMaterialized;
                info!(%full_name, %directory, ?state, %stage, "local working copy ready");
            }
            Err(MaterializeFailure { state, error }) => {
                if state.was_created() {
                    compensations.push(Compensation::RemoveDirectory(directory.to_owned()));
                }
                warn!(%full_name, %stage, %error, "local setup failed; rolling back");
                let failures = self.compensate(&repository, compensations).await;
                return Err(
                    CreateRepositoryError::new(stage, error).with_cleanup_failures(failures)
                );
            }
        }

        stage = WorkflowStage::Done;
        info!(%full_name, %stage, "repository created");
        Ok(repository)
    }

    async fn compensate(
        &self,
        repository: &RepositoryDescriptor,
        compensations: Vec<Compensation>,
    ) -> Vec<CleanupFailure> {
        let mut failures = Vec::new();
        for compensation in compensations.into_iter().rev() {
            match compensation {
                Compensation::RemoveDirectory(path) => match remove_directory(&path) {
                    Ok(()) => info!(%path, "removed directory created by this run"),
                    Err(error) => {
                        warn!(%path, %error, "could not remove directory");
                        failures.push(CleanupFailure::Directory(error));
                    }
                },
                Compensation::DeleteRemote => {
                    let full_name = repository.full_name();
                    match self.remote.delete_remote(repository).await {
                        Ok(()) => info!(%full_name, "deleted remote repository"),
                        Err(error) => {
                            warn!(%full_name, %error, "could not delete remote repository");
                            failures.push(CleanupFailure::Remote(error));
                        }
                    }
                }
            }
        }
        failures
    }
}

/// Creates a remote repository and a local working copy for `request`.
///
/// Shorthand for [`CreateRepository::new`] followed by
/// [`CreateRepository::run`].
///
/// # Errors
///
/// Returns a [`CreateRepositoryError`] as described on
/// [`CreateRepository::run`].
pub async fn create_repository<R, V>(
    remote: &R,
    vcs: &V,
    request: &CreateRepositoryRequest,
) -> Result<RepositoryDescriptor, CreateRepositoryError>
where
    R: RemoteHost + ?Sized,
    V: LocalVcs + ?Sized,
{
    CreateRepository::new(remote, vcs).run(request).await
}
