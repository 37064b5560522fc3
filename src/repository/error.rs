//! Validation errors raised while building a repository descriptor.

use thiserror::Error;

/// Reasons a repository descriptor could not be constructed.
///
/// None of these failures have side effects: they are raised before any
/// remote or local state is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The repository owner was blank.
    #[error("repository owner is required")]
    EmptyOwner,

    /// The repository owner contained characters a hosting service rejects.
    #[error("repository owner is invalid: {owner}")]
    InvalidOwner {
        /// The rejected owner value.
        owner: String,
    },

    /// The target directory was not absolute.
    #[error("target directory must be an absolute path: {directory}")]
    RelativeDirectory {
        /// The rejected directory.
        directory: String,
    },

    /// No repository name could be derived from the target directory.
    #[error("could not derive a repository name from directory: {directory}")]
    MissingName {
        /// The directory without a usable last segment.
        directory: String,
    },

    /// The visibility is not one of `public`, `private` or `internal`.
    #[error("unknown repository visibility '{value}' (expected public, private or internal)")]
    UnknownVisibility {
        /// The rejected visibility value.
        value: String,
    },

    /// The remote base URL could not be parsed or cannot carry a path.
    #[error("remote base URL is invalid: {message}")]
    InvalidBaseUrl {
        /// Parser detail or the reason the URL was rejected.
        message: String,
    },
}
