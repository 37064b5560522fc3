//! Version-control capability used to populate the working copy.

use camino::Utf8Path;
use url::Url;

use super::error::LocalError;
use super::setup::InitialCommit;

/// Operations the workflow needs from the local version-control tool.
///
/// The directory handed to these methods already exists and is empty.
#[cfg_attr(test, mockall::automock)]
pub trait LocalVcs: Send + Sync {
    /// Clones `remote_url` into `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::Clone`] when the clone fails for any reason.
    fn clone_repository(&self, remote_url: &Url, directory: &Utf8Path) -> Result<(), LocalError>;

    /// Initialises a repository in `directory`, records `commit`, points
    /// `origin` at `remote_url` and pushes the branch with upstream tracking.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::Initialize`] when the repository or commit cannot
    /// be created and [`LocalError::Push`] when the push fails.
    fn initialize_and_push(
        &self,
        remote_url: &Url,
        directory: &Utf8Path,
        commit: &InitialCommit,
    ) -> Result<(), LocalError>;
}
