//! Repository visibility levels understood by the hosting service.

use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Who may see a newly created repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible to everyone.
    #[default]
    Public,
    /// Visible to the owner and explicit collaborators.
    Private,
    /// Visible to members of the owning enterprise.
    Internal,
}

impl Visibility {
    /// All recognised visibility levels, in prompt order.
    pub const ALL: [Self; 3] = [Self::Public, Self::Private, Self::Internal];

    /// Lowercase name used by the hosting API and the `gh` CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }

    /// Whether the repository is hidden from anonymous users.
    #[must_use]
    pub const fn is_private(self) -> bool {
        !matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|visibility| visibility.as_str() == normalised)
            .ok_or_else(|| ValidationError::UnknownVisibility {
                value: value.to_owned(),
            })
    }
}
