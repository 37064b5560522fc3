//! Materialisation of the local working copy for a descriptor.

use crate::repository::RepositoryDescriptor;

use super::directory::{DirectoryState, prepare_directory};
use super::error::LocalError;
use super::setup::LocalSetup;
use super::vcs::LocalVcs;

/// A failed materialisation together with what happened to the directory.
///
/// The state is reported even on failure so the caller only removes a
/// directory this run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeFailure {
    /// State of the target directory when the failure occurred.
    pub state: DirectoryState,
    /// What went wrong.
    pub error: LocalError,
}

/// Prepares the target directory and populates it according to `setup`.
///
/// # Errors
///
/// Returns a [`MaterializeFailure`] carrying the directory state and either a
/// path error from preparation or the VCS failure.
pub fn materialize_local_copy<V>(
    vcs: &V,
    repository: &RepositoryDescriptor,
    setup: &LocalSetup,
) -> Result<DirectoryState, MaterializeFailure>
where
    V: LocalVcs + ?Sized,
{
    let directory = repository.directory();
    let state = prepare_directory(directory).map_err(|error| MaterializeFailure {
        state: DirectoryState::Unknown,
        error,
    })?;
    tracing::debug!(%directory, ?state, "target directory prepared");

    let remote_url = repository.remote_url();
    let outcome = match setup {
        LocalSetup::Clone => vcs.clone_repository(&remote_url, directory),
        LocalSetup::Initialize(commit) => vcs.initialize_and_push(&remote_url, directory, commit),
    };

    outcome
        .map(|()| state)
        .map_err(|error| MaterializeFailure { state, error })
}
