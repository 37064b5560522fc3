//! Octocrab client construction for the API remote host.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use super::error::RemoteHostError;
use super::error_mapping::describe_octocrab_error;
use super::token::AccessToken;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns [`RemoteHostError::Unavailable`] when the base URI cannot be
/// parsed or Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &AccessToken,
    api_base: &Url,
) -> Result<Octocrab, RemoteHostError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| RemoteHostError::Unavailable {
            message: format!("invalid API base {api_base}: {error}"),
        })?;

    Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| RemoteHostError::Unavailable {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| RemoteHostError::Unavailable {
            message: describe_octocrab_error("build client", &error),
        })
}
