//! Error types for local working-copy preparation.

use thiserror::Error;

/// Errors that may occur while preparing or populating the local directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalError {
    /// The directory that should contain the working copy does not exist.
    ///
    /// Missing parents are never created.
    #[error("parent directory does not exist: {path} (create it first or choose an existing parent)")]
    MissingParent {
        /// The missing parent directory.
        path: String,
    },

    /// The target exists but is a file or other non-directory entry.
    #[error("target exists but is not a directory: {path}")]
    NotADirectory {
        /// The offending target path.
        path: String,
    },

    /// The target directory already holds a Git repository.
    #[error("target directory already contains a Git repository: {path}")]
    AlreadyRepository {
        /// The offending target path.
        path: String,
    },

    /// The target directory exists and has entries.
    #[error("target directory is not empty: {path}")]
    NotEmpty {
        /// The offending target path.
        path: String,
    },

    /// A filesystem operation on the target failed.
    #[error("filesystem error at {path}: {message}")]
    Path {
        /// Path the operation was applied to.
        path: String,
        /// Error detail from the operating system.
        message: String,
    },

    /// Cloning the remote repository failed.
    #[error("failed to clone {url}: {message}")]
    Clone {
        /// Remote URL being cloned.
        url: String,
        /// Error detail from Git.
        message: String,
    },

    /// Initialising the local repository or its first commit failed.
    #[error("failed to initialise local repository: {message}")]
    Initialize {
        /// Error detail from Git.
        message: String,
    },

    /// Pushing the initial commit failed.
    #[error("failed to push to {url}: {message}")]
    Push {
        /// Remote URL being pushed to.
        url: String,
        /// Error detail from Git.
        message: String,
    },

    /// A directory created by this run could not be removed again.
    #[error("failed to remove directory {path}: {message}")]
    Remove {
        /// The directory left behind.
        path: String,
        /// Error detail from the operating system.
        message: String,
    },
}

impl LocalError {
    /// Whether the failure happened before Git was invoked, i.e. while
    /// checking or creating the target directory.
    #[must_use]
    pub const fn is_path_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParent { .. }
                | Self::NotADirectory { .. }
                | Self::AlreadyRepository { .. }
                | Self::NotEmpty { .. }
                | Self::Path { .. }
        )
    }
}

impl From<git2::Error> for LocalError {
    fn from(error: git2::Error) -> Self {
        Self::Initialize {
            message: error.message().to_owned(),
        }
    }
}
