//! Recording test doubles for the workflow gateways.
//!
//! Available to unit tests and, through the `test-support` feature, to
//! integration tests that cannot use the `mockall` mocks.
//!
//! # Examples
//!
//! ```
//! use scaffold::test_support::{RecordingRemoteHost, RemoteCall};
//!
//! let remote = RecordingRemoteHost::new().failing_delete("HTTP 403");
//! assert!(remote.calls().is_empty());
//! assert_eq!(remote.count(RemoteCall::Delete), 0);
//! ```

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use url::Url;

use crate::local::{InitialCommit, LocalError, LocalVcs};
use crate::remote::{RemoteHost, RemoteHostError};
use crate::repository::RepositoryDescriptor;

/// A call made to [`RecordingRemoteHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    /// `create_remote` was invoked.
    Create,
    /// `delete_remote` was invoked.
    Delete,
}

/// Remote host that records calls and fails on request.
#[derive(Debug, Default)]
pub struct RecordingRemoteHost {
    create_failure: Option<String>,
    delete_failure: Option<String>,
    calls: Mutex<Vec<RemoteCall>>,
}

impl RecordingRemoteHost {
    /// Creates a host on which every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_remote` fail with `message`.
    #[must_use]
    pub fn failing_create(mut self, message: impl Into<String>) -> Self {
        self.create_failure = Some(message.into());
        self
    }

    /// Makes `delete_remote` fail with `message`.
    #[must_use]
    pub fn failing_delete(mut self, message: impl Into<String>) -> Self {
        self.delete_failure = Some(message.into());
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times `call` was received.
    pub fn count(&self, call: RemoteCall) -> usize {
        self.calls().into_iter().filter(|made| *made == call).count()
    }

    fn record(&self, call: RemoteCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl RemoteHost for RecordingRemoteHost {
    async fn create_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        self.record(RemoteCall::Create);
        self.create_failure
            .as_ref()
            .map_or(Ok(()), |message| {
                Err(RemoteHostError::create(repository.full_name(), message.clone()))
            })
    }

    async fn delete_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        self.record(RemoteCall::Delete);
        self.delete_failure
            .as_ref()
            .map_or(Ok(()), |message| {
                Err(RemoteHostError::delete(repository.full_name(), message.clone()))
            })
    }
}

/// Local VCS that records target directories and fails on request.
///
/// It never writes to the directory it is given.
#[derive(Debug, Default)]
pub struct ScriptedVcs {
    failure: Option<LocalError>,
    targets: Mutex<Vec<Utf8PathBuf>>,
}

impl ScriptedVcs {
    /// Creates a VCS on which every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `error`.
    #[must_use]
    pub fn failing(mut self, error: LocalError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Directories passed to the VCS so far.
    pub fn targets(&self) -> Vec<Utf8PathBuf> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, directory: &Utf8Path) -> Result<(), LocalError> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(directory.to_owned());
        self.failure.clone().map_or(Ok(()), Err)
    }
}

impl LocalVcs for ScriptedVcs {
    fn clone_repository(&self, _remote_url: &Url, directory: &Utf8Path) -> Result<(), LocalError> {
        self.record(directory)
    }

    fn initialize_and_push(
        &self,
        _remote_url: &Url,
        directory: &Utf8Path,
        _commit: &InitialCommit,
    ) -> Result<(), LocalError> {
        self.record(directory)
    }
}
