//! Aggregated failure of the create-repository workflow.

use std::fmt;

use thiserror::Error;

use crate::local::LocalError;
use crate::remote::RemoteHostError;
use crate::repository::ValidationError;

use super::stage::WorkflowStage;

/// The failure that stopped the workflow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FailureCause {
    /// The request could not be turned into a repository descriptor.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote repository could not be created.
    #[error(transparent)]
    Remote(#[from] RemoteHostError),

    /// The local directory could not be prepared or populated.
    #[error(transparent)]
    Local(#[from] LocalError),
}

/// A compensating action that failed while undoing earlier steps.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CleanupFailure {
    /// A directory created by this run was left behind.
    #[error(transparent)]
    Directory(LocalError),

    /// The remote repository created by this run could not be deleted.
    #[error(transparent)]
    Remote(RemoteHostError),
}

/// Error returned by [`CreateRepository::run`](super::CreateRepository::run).
///
/// Carries the primary cause, the last stage completed before it, and any
/// cleanup failures. The rendered message is the cause alone when cleanup
/// succeeded; otherwise each cleanup failure follows on its own line as
/// `cleanup failed: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepositoryError {
    stage: WorkflowStage,
    cause: FailureCause,
    cleanup_failures: Vec<CleanupFailure>,
}

impl CreateRepositoryError {
    /// Builds an error that needed no cleanup.
    #[must_use]
    pub fn new(stage: WorkflowStage, cause: impl Into<FailureCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
            cleanup_failures: Vec::new(),
        }
    }

    /// Attaches the failures collected while compensating.
    #[must_use]
    pub fn with_cleanup_failures(mut self, failures: Vec<CleanupFailure>) -> Self {
        self.cleanup_failures = failures;
        self
    }

    /// The failure that stopped the workflow.
    #[must_use]
    pub const fn cause(&self) -> &FailureCause {
        &self.cause
    }

    /// The last stage completed before the failure.
    #[must_use]
    pub const fn failed_stage(&self) -> WorkflowStage {
        self.stage
    }

    /// Compensating actions that did not succeed, in the order they ran.
    #[must_use]
    pub fn cleanup_failures(&self) -> &[CleanupFailure] {
        &self.cleanup_failures
    }

    /// Whether every side effect of the run was undone.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.cleanup_failures.is_empty()
    }
}

impl fmt::Display for CreateRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        for failure in &self.cleanup_failures {
            write!(f, "\ncleanup failed: {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CreateRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
