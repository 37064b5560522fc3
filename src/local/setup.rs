//! How the local working copy is populated.

const PURPOSE_PREFIX: &str = "Repo Purpose: ";

/// First commit recorded when initialising a repository locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialCommit {
    purpose: String,
    branch: Option<String>,
}

impl InitialCommit {
    /// Builds an initial commit from the repository purpose.
    ///
    /// Returns `None` when the purpose is blank.
    #[must_use]
    pub fn new(purpose: impl AsRef<str>) -> Option<Self> {
        let trimmed = purpose.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self {
            purpose: trimmed.to_owned(),
            branch: None,
        })
    }

    /// Pins the branch name instead of reading `init.defaultBranch`.
    #[must_use]
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// The trimmed purpose text.
    #[must_use]
    pub const fn purpose(&self) -> &str {
        self.purpose.as_str()
    }

    /// Explicit branch, if one was pinned.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Commit message, e.g. `Repo Purpose: internal billing service`.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{PURPOSE_PREFIX}{}", self.purpose)
    }
}

/// Strategy used to materialise the working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocalSetup {
    /// Clone the freshly created remote.
    #[default]
    Clone,
    /// Initialise locally, commit, add `origin` and push.
    Initialize(InitialCommit),
}
