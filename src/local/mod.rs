//! Local working-copy gateway.
//!
//! This module prepares the target directory (creating only its final
//! segment and remembering whether it did so) and populates it through a
//! [`LocalVcs`] implementation, either by cloning the new remote or by
//! initialising a repository and pushing a first commit.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use scaffold::local::{DirectoryState, prepare_directory};
//!
//! let state = prepare_directory(Utf8Path::new("/home/me/repos/new-repo"));
//! if let Ok(DirectoryState::Created) = state {
//!     println!("created a fresh directory");
//! }
//! ```

mod directory;
mod error;
mod git2_vcs;
mod materialize;
mod setup;
mod vcs;

pub use directory::{
    DirectoryState, TargetStatus, inspect_target, prepare_directory, remove_directory,
};
pub use error::LocalError;
pub use git2_vcs::{CommitIdentity, Git2Vcs};
pub use materialize::{MaterializeFailure, materialize_local_copy};
pub use setup::{InitialCommit, LocalSetup};
pub use vcs::LocalVcs;

#[cfg(test)]
pub use vcs::MockLocalVcs;
