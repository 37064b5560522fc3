//! Input to the create-repository workflow.

use camino::Utf8PathBuf;

use crate::local::LocalSetup;
use crate::repository::{RepositoryDescriptor, ValidationError, Visibility};

/// Everything the workflow needs, gathered once by the caller.
///
/// Values are kept as supplied; validation happens when the workflow builds
/// the [`RepositoryDescriptor`], so an invalid request fails before any side
/// effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepositoryRequest {
    /// Account or organisation that will own the repository.
    pub owner: String,
    /// Absolute path of the working copy; its last segment names the
    /// repository.
    pub directory: Utf8PathBuf,
    /// Requested visibility as text (`public`, `private` or `internal`).
    pub visibility: String,
    /// Base URL of the hosting service, e.g. `https://github.com/`.
    pub base_url: String,
    /// How the working copy is populated.
    pub setup: LocalSetup,
}

impl CreateRepositoryRequest {
    /// Creates a request that clones the new remote into `directory`.
    pub fn new(
        owner: impl Into<String>,
        directory: impl Into<Utf8PathBuf>,
        visibility: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            directory: directory.into(),
            visibility: visibility.into(),
            base_url: base_url.into(),
            setup: LocalSetup::default(),
        }
    }

    /// Replaces how the working copy is populated.
    #[must_use]
    pub fn with_setup(mut self, setup: LocalSetup) -> Self {
        self.setup = setup;
        self
    }

    /// Validates the request and builds the repository descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown visibility, a blank or
    /// malformed owner, an unusable directory, or an invalid base URL.
    pub fn descriptor(&self) -> Result<RepositoryDescriptor, ValidationError> {
        let visibility: Visibility = self.visibility.parse()?;
        RepositoryDescriptor::new(
            &self.owner,
            self.directory.clone(),
            visibility,
            &self.base_url,
        )
    }
}
