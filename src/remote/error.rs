//! Error types exposed by remote host adapters.

use thiserror::Error;

/// Failures reported by a [`RemoteHost`](super::RemoteHost).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteHostError {
    /// The hosting service rejected or failed the creation request.
    #[error("failed to create remote repository {full_name}: {message}")]
    Create {
        /// `owner/name` of the repository.
        full_name: String,
        /// Underlying cause reported by the host or transport.
        message: String,
    },

    /// The hosting service rejected or failed the deletion request.
    ///
    /// The remote repository may still exist when this is returned.
    #[error("failed to delete remote repository {full_name} (it may still exist): {message}")]
    Delete {
        /// `owner/name` of the repository.
        full_name: String,
        /// Underlying cause reported by the host or transport.
        message: String,
    },

    /// The adapter could not be constructed or reached.
    #[error("remote host unavailable: {message}")]
    Unavailable {
        /// Details about the failure.
        message: String,
    },
}

impl RemoteHostError {
    /// Builds a creation failure for `full_name`.
    pub fn create(full_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Create {
            full_name: full_name.into(),
            message: message.into(),
        }
    }

    /// Builds a deletion failure for `full_name`.
    pub fn delete(full_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delete {
            full_name: full_name.into(),
            message: message.into(),
        }
    }
}
