//! The create-repository workflow.
//!
//! [`CreateRepository`] validates a [`CreateRepositoryRequest`], creates the
//! remote repository, then prepares and populates the local directory. A
//! failure after the remote exists rolls back what this run created and
//! reports the original failure together with any cleanup that did not
//! succeed.

mod error;
mod orchestrator;
mod request;
mod stage;

pub use error::{CleanupFailure, CreateRepositoryError, FailureCause};
pub use orchestrator::{CreateRepository, create_repository};
pub use request::CreateRepositoryRequest;
pub use stage::WorkflowStage;
