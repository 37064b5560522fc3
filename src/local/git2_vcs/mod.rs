//! Git2-based implementation of [`LocalVcs`].

use camino::Utf8Path;
use git2::build::RepoBuilder;
use git2::{
    Config, Cred, CredentialType, ErrorCode, FetchOptions, PushOptions, RemoteCallbacks,
    Repository, RepositoryInitOptions, Signature,
};
use url::Url;

use crate::remote::AccessToken;

use super::error::LocalError;
use super::setup::InitialCommit;
use super::vcs::LocalVcs;

const ORIGIN: &str = "origin";
const FALLBACK_BRANCH: &str = "main";
const TOKEN_USERNAME: &str = "x-access-token";
const MAX_CREDENTIAL_ATTEMPTS: u8 = 3;

/// Author identity used for the initial commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    name: String,
    email: String,
}

impl CommitIdentity {
    /// Creates an identity from a name and email address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Local VCS backed by libgit2.
///
/// HTTPS credentials come from the configured token, then the Git credential
/// helper; SSH remotes use the SSH agent.
#[derive(Debug, Clone, Default)]
pub struct Git2Vcs {
    token: Option<AccessToken>,
    identity: Option<CommitIdentity>,
}

impl Git2Vcs {
    /// Creates a VCS gateway using ambient Git configuration only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates HTTPS transfers with `token`.
    #[must_use]
    pub fn with_token(mut self, token: Option<AccessToken>) -> Self {
        self.token = token;
        self
    }

    /// Overrides the author of the initial commit instead of reading
    /// `user.name` and `user.email`.
    #[must_use]
    pub fn with_identity(mut self, identity: Option<CommitIdentity>) -> Self {
        self.identity = identity;
        self
    }

    fn callbacks(&self) -> RemoteCallbacks<'static> {
        let mut callbacks = RemoteCallbacks::new();
        let token = self.token.clone();
        let mut attempts = 0_u8;
        callbacks.credentials(move |url, username, allowed| {
            attempts = attempts.saturating_add(1);
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }
            resolve_credentials(token.as_ref(), url, username, allowed)
        });
        callbacks
    }

    fn signature(&self, repo: &Repository) -> Result<Signature<'static>, LocalError> {
        let signature = match &self.identity {
            Some(identity) => Signature::now(&identity.name, &identity.email),
            None => repo.signature(),
        };
        signature.map_err(|error| LocalError::Initialize {
            message: format!(
                "no commit identity ({}); set user.name and user.email",
                error.message()
            ),
        })
    }

    fn push(&self, repo: &Repository, remote_url: &Url, branch: &str) -> Result<(), LocalError> {
        let push_error = |message: String| LocalError::Push {
            url: remote_url.to_string(),
            message,
        };

        let mut callbacks = self.callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(reason) => Err(git2::Error::from_str(&format!("{refname} rejected: {reason}"))),
            None => Ok(()),
        });
        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        let mut remote = repo
            .find_remote(ORIGIN)
            .map_err(|error| push_error(error.message().to_owned()))?;
        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .map_err(|error| push_error(error.message().to_owned()))?;

        set_upstream(repo, branch).map_err(|error| push_error(error.message().to_owned()))
    }
}

fn resolve_credentials(
    token: Option<&AccessToken>,
    url: &str,
    username: Option<&str>,
    allowed: CredentialType,
) -> Result<Cred, git2::Error> {
    if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
        if let Some(token) = token {
            return Cred::userpass_plaintext(TOKEN_USERNAME, token.value());
        }
        if let Ok(config) = Config::open_default()
            && let Ok(credential) = Cred::credential_helper(&config, url, username)
        {
            return Ok(credential);
        }
    }
    if allowed.contains(CredentialType::SSH_KEY) {
        return Cred::ssh_key_from_agent(username.unwrap_or("git"));
    }
    if allowed.contains(CredentialType::DEFAULT) {
        return Cred::default();
    }
    Err(git2::Error::from_str("no usable credentials for remote"))
}

/// Reads `init.defaultBranch` from the user's Git configuration.
fn default_branch() -> String {
    Config::open_default()
        .and_then(|config| config.get_string("init.defaultBranch"))
        .ok()
        .map(|branch| branch.trim().to_owned())
        .filter(|branch| !branch.is_empty())
        .unwrap_or_else(|| FALLBACK_BRANCH.to_owned())
}

/// Points `origin` at `remote_url`, replacing any existing definition.
pub(crate) fn replace_origin(repo: &Repository, remote_url: &Url) -> Result<(), git2::Error> {
    match repo.remote_delete(ORIGIN) {
        Ok(()) => {}
        Err(error) if error.code() == ErrorCode::NotFound => {}
        Err(error) => return Err(error),
    }
    repo.remote(ORIGIN, remote_url.as_str()).map(drop)
}

fn set_upstream(repo: &Repository, branch: &str) -> Result<(), git2::Error> {
    let mut config = repo.config()?;
    config.set_str(&format!("branch.{branch}.remote"), ORIGIN)?;
    config.set_str(
        &format!("branch.{branch}.merge"),
        &format!("refs/heads/{branch}"),
    )
}

fn create_empty_commit(
    repo: &Repository,
    signature: &Signature<'_>,
    message: &str,
) -> Result<(), git2::Error> {
    let tree_id = repo.index()?.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    repo.commit(Some("HEAD"), signature, signature, message, &tree, &[])
        .map(drop)
}

impl LocalVcs for Git2Vcs {
    fn clone_repository(&self, remote_url: &Url, directory: &Utf8Path) -> Result<(), LocalError> {
        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(self.callbacks());

        tracing::debug!(url = %remote_url, %directory, "cloning repository");
        RepoBuilder::new()
            .fetch_options(fetch)
            .clone(remote_url.as_str(), directory.as_std_path())
            .map(drop)
            .map_err(|error| LocalError::Clone {
                url: remote_url.to_string(),
                message: error.message().to_owned(),
            })
    }

    fn initialize_and_push(
        &self,
        remote_url: &Url,
        directory: &Utf8Path,
        commit: &InitialCommit,
    ) -> Result<(), LocalError> {
        let branch = commit
            .branch()
            .map_or_else(default_branch, ToOwned::to_owned);

        tracing::debug!(%directory, %branch, "initialising repository");
        let mut options = RepositoryInitOptions::new();
        options.initial_head(&branch).mkdir(false);
        let repo = Repository::init_opts(directory.as_std_path(), &options)?;

        let signature = self.signature(&repo)?;
        create_empty_commit(&repo, &signature, &commit.message())?;
        replace_origin(&repo, remote_url)?;

        tracing::debug!(url = %remote_url, %branch, "pushing initial commit");
        self.push(&repo, remote_url, &branch)
    }
}
