//! Octocrab-backed remote host talking to the hosting REST API.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::repository::{RepositoryDescriptor, Visibility};

use super::RemoteHost;
use super::client::build_octocrab_client;
use super::error::RemoteHostError;
use super::error_mapping::describe_octocrab_error;
use super::token::AccessToken;

const ORGANISATION_KIND: &str = "Organization";

/// Account returned by `GET /users/{login}` and `GET /user`.
#[derive(Debug, Deserialize)]
struct ApiAccount {
    login: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Request body for repository creation.
#[derive(Debug, Serialize)]
struct CreateRepositoryBody<'a> {
    name: &'a str,
    private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    visibility: Option<&'a str>,
}

/// Subset of the repository returned after creation.
#[derive(Debug, Deserialize)]
struct ApiRepository {
    full_name: String,
}

/// Remote host that creates and deletes repositories through the REST API.
pub struct OctocrabRemoteHost {
    client: Octocrab,
}

impl OctocrabRemoteHost {
    /// Creates a remote host from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated client for `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteHostError::Unavailable`] when the client cannot be
    /// constructed.
    pub fn for_token(token: &AccessToken, api_base: &Url) -> Result<Self, RemoteHostError> {
        let client = build_octocrab_client(token, api_base)?;
        Ok(Self::new(client))
    }

    async fn account(&self, route: &str) -> Result<ApiAccount, String> {
        let account: ApiAccount = self
            .client
            .get(route, None::<&()>)
            .await
            .map_err(|error| describe_octocrab_error("look up account", &error))?;
        Ok(account)
    }

    /// Chooses the creation endpoint for the repository owner.
    ///
    /// Organisations accept every visibility level. Personal repositories can
    /// only be created for the authenticated user and cannot be `internal`.
    async fn creation_route(&self, repository: &RepositoryDescriptor) -> Result<String, String> {
        let owner = repository.owner();
        let account = self.account(&format!("/users/{owner}")).await?;
        if account.kind == ORGANISATION_KIND {
            return Ok(format!("/orgs/{owner}/repos"));
        }

        if repository.visibility() == Visibility::Internal {
            return Err(format!(
                "internal visibility requires an organisation owner, but {owner} is a user"
            ));
        }

        let current = self.account("/user").await?;
        if !current.login.eq_ignore_ascii_case(owner) {
            return Err(format!(
                "{owner} is a user account other than the authenticated user {}",
                current.login
            ));
        }
        Ok("/user/repos".to_owned())
    }
}

#[async_trait]
impl RemoteHost for OctocrabRemoteHost {
    async fn create_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        let full_name = repository.full_name();
        let route = self
            .creation_route(repository)
            .await
            .map_err(|message| RemoteHostError::create(&full_name, message))?;

        let visibility = repository.visibility();
        let body = CreateRepositoryBody {
            name: repository.name(),
            private: visibility.is_private(),
            visibility: route
                .starts_with("/orgs/")
                .then_some(visibility.as_str()),
        };

        tracing::debug!(%route, %full_name, %visibility, "creating remote repository");
        let created: ApiRepository = self
            .client
            .post(route.as_str(), Some(&body))
            .await
            .map_err(|error| {
                RemoteHostError::create(&full_name, describe_octocrab_error("create repository", &error))
            })?;
        tracing::debug!(created = %created.full_name, "remote repository created");
        Ok(())
    }

    async fn delete_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        let full_name = repository.full_name();
        tracing::debug!(%full_name, "deleting remote repository");
        self.client
            .repos(repository.owner(), repository.name())
            .delete()
            .await
            .map_err(|error| {
                RemoteHostError::delete(&full_name, describe_octocrab_error("delete repository", &error))
            })
    }
}
