//! Selection of the remote host adapter.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::repository::RepositoryDescriptor;

use super::error::RemoteHostError;
use super::token::AccessToken;
use super::{FilesystemRemoteHost, GhCliRemoteHost, OctocrabRemoteHost, RemoteHost};

const FILE_SCHEME: &str = "file";

/// Transport used to reach the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteBackend {
    /// REST API through Octocrab; requires a token.
    Api,
    /// The external `gh` client.
    GhCli,
    /// Bare repositories on the local filesystem.
    Filesystem,
}

impl RemoteBackend {
    /// Picks a backend when none was configured: `file://` URLs use the
    /// filesystem, otherwise the API is used when a token is available and
    /// the `gh` client when it is not.
    #[must_use]
    pub fn infer(base_url: &Url, token: Option<&AccessToken>) -> Self {
        if base_url.scheme() == FILE_SCHEME {
            Self::Filesystem
        } else if token.is_some() {
            Self::Api
        } else {
            Self::GhCli
        }
    }

    /// Configuration name of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::GhCli => "gh",
            Self::Filesystem => "fs",
        }
    }
}

impl fmt::Display for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "gh" => Ok(Self::GhCli),
            "fs" | "filesystem" => Ok(Self::Filesystem),
            other => Err(format!("unknown remote backend '{other}' (expected api, gh or fs)")),
        }
    }
}

/// Builds the remote host adapter for `backend`.
///
/// # Errors
///
/// Returns [`RemoteHostError::Unavailable`] when the API backend is chosen
/// without a token, when no API endpoint can be derived from the base URL, or
/// when the client cannot be constructed.
pub fn connect(
    backend: RemoteBackend,
    repository: &RepositoryDescriptor,
    token: Option<&AccessToken>,
) -> Result<Box<dyn RemoteHost>, RemoteHostError> {
    match backend {
        RemoteBackend::Api => {
            let token = token.ok_or_else(|| RemoteHostError::Unavailable {
                message: "the api backend requires a token (set SCAFFOLD_TOKEN or GITHUB_TOKEN)"
                    .to_owned(),
            })?;
            let api_base = repository
                .api_base()
                .map_err(|error| RemoteHostError::Unavailable {
                    message: error.to_string(),
                })?;
            Ok(Box::new(OctocrabRemoteHost::for_token(token, &api_base)?))
        }
        RemoteBackend::GhCli => Ok(Box::new(GhCliRemoteHost::for_base_url(
            repository.base_url(),
        ))),
        RemoteBackend::Filesystem => Ok(Box::new(FilesystemRemoteHost)),
    }
}
