//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach and turned into an
//! explicit [`CreateRepositoryRequest`] once at start-up; nothing below this
//! module reads configuration from global state.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.scaffold.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `SCAFFOLD_OWNER`, `SCAFFOLD_TOKEN`, and so
//!    on, plus the fallbacks `GITHUB_ORG`, `GITHUB_TOKEN` and `GH_TOKEN`
//! 4. **Command-line arguments** – `--name`/`-n`, `--owner`/`-o`, …
//!
//! # Configuration File
//!
//! ```toml
//! owner = "acme"
//! destination_dir = "/home/me/src"
//! visibility = "private"
//! remote_base_url = "https://github.example.com/"
//! author_name = "Ada Lovelace"
//! author_email = "ada@example.com"
//! ```

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::local::{CommitIdentity, InitialCommit, LocalSetup};
use crate::remote::{AccessToken, RemoteBackend};
use crate::workflow::CreateRepositoryRequest;

/// Default hosting service.
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://github.com/";

/// Default repository visibility.
pub const DEFAULT_VISIBILITY: &str = "public";

/// Directory below `$HOME` used when no destination is configured.
const DEFAULT_DESTINATION_LEAF: &str = "repos";

/// Errors raised while turning configuration into a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration sources could not be read or merged.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Details from the configuration loader.
        message: String,
    },

    /// No repository name was given.
    #[error("repository name is required (use --name or -n)")]
    MissingName,

    /// No repository owner was given.
    #[error("repository owner is required (use --owner or -o, or set GITHUB_ORG)")]
    MissingOwner,

    /// No destination directory was given and no home directory is known.
    #[error("destination directory is required (use --destination-dir or -d)")]
    MissingDestination,

    /// The backend name is not recognised.
    #[error("{message}")]
    InvalidBackend {
        /// Parser detail naming the accepted values.
        message: String,
    },
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use scaffold::ScaffoldConfig;
///
/// let config = ScaffoldConfig::load().expect("failed to load configuration");
/// let request = config.to_request().expect("owner and name required");
/// println!("creating {}", request.directory);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SCAFFOLD",
    discovery(
        dotfile_name = ".scaffold.toml",
        config_file_name = "scaffold.toml",
        app_name = "scaffold"
    )
)]
pub struct ScaffoldConfig {
    /// Repository name, or an absolute path whose last segment is the name.
    ///
    /// Can be provided via:
    /// - CLI: `--name <NAME>` or `-n <NAME>`
    /// - Environment: `SCAFFOLD_NAME`
    #[ortho_config(cli_short = 'n')]
    pub name: Option<String>,

    /// Account or organisation that owns the new repository.
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `SCAFFOLD_OWNER` or `GITHUB_ORG`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Directory that receives working copies named by a bare name.
    ///
    /// Defaults to `$HOME/repos`.
    #[ortho_config(cli_short = 'd')]
    pub destination_dir: Option<String>,

    /// Repository visibility: `public`, `private` or `internal`.
    #[ortho_config(cli_short = 's')]
    pub visibility: String,

    /// Base URL of the hosting service.
    #[ortho_config(cli_short = 'b')]
    pub remote_base_url: String,

    /// Access token for the hosting service API and Git transport.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `SCAFFOLD_TOKEN`, `GITHUB_TOKEN` or `GH_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Remote backend: `api`, `gh` or `fs`.
    ///
    /// When unset, `file://` base URLs use `fs`, a configured token selects
    /// `api`, and otherwise the `gh` CLI is used.
    #[ortho_config()]
    pub backend: Option<String>,

    /// Purpose of the repository.
    ///
    /// When set, the working copy is initialised locally with an empty
    /// commit describing the purpose and pushed, instead of being cloned.
    #[ortho_config(cli_short = 'p')]
    pub purpose: Option<String>,

    /// Branch for the initial commit; defaults to Git's `init.defaultBranch`.
    #[ortho_config()]
    pub branch: Option<String>,

    /// Commit author name used for the initial commit.
    #[ortho_config()]
    pub author_name: Option<String>,

    /// Commit author email used for the initial commit.
    #[ortho_config()]
    pub author_email: Option<String>,

    /// Skips the confirmation prompt.
    ///
    /// Boolean values are not read from the environment.
    #[ortho_config(cli_short = 'y')]
    pub yes: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            name: None,
            owner: None,
            destination_dir: None,
            visibility: DEFAULT_VISIBILITY.to_owned(),
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_owned(),
            token: None,
            backend: None,
            purpose: None,
            branch: None,
            author_name: None,
            author_email: None,
            yes: false,
        }
    }
}

impl ScaffoldConfig {
    /// Loads configuration from every source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_layers() -> Result<Self, ConfigError> {
        Self::load().map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Resolves the access token, falling back to `GITHUB_TOKEN` and then
    /// `GH_TOKEN`. Blank values are ignored.
    #[must_use]
    pub fn resolve_token(&self) -> Option<AccessToken> {
        self.token
            .as_deref()
            .and_then(AccessToken::new)
            .or_else(|| env_value("GITHUB_TOKEN").and_then(AccessToken::new))
            .or_else(|| env_value("GH_TOKEN").and_then(AccessToken::new))
    }

    /// Resolves the repository owner, falling back to `GITHUB_ORG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOwner`] when no source provides one.
    pub fn resolve_owner(&self) -> Result<String, ConfigError> {
        self.owner
            .clone()
            .or_else(|| env_value("GITHUB_ORG"))
            .filter(|owner| !owner.trim().is_empty())
            .ok_or(ConfigError::MissingOwner)
    }

    /// Resolves the working-copy directory.
    ///
    /// An absolute `name` is used as given; a relative one is placed below
    /// the destination directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingName`] without a name and
    /// [`ConfigError::MissingDestination`] when a relative name has nowhere
    /// to go.
    pub fn resolve_directory(&self) -> Result<Utf8PathBuf, ConfigError> {
        let target = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Utf8Path::new)
            .ok_or(ConfigError::MissingName)?;
        if target.is_absolute() {
            return Ok(target.to_owned());
        }
        Ok(self.destination()?.join(target))
    }

    /// Returns how the working copy should be populated.
    #[must_use]
    pub fn local_setup(&self) -> LocalSetup {
        let Some(commit) = self.purpose.as_deref().and_then(InitialCommit::new) else {
            return LocalSetup::Clone;
        };
        match self.branch.as_deref().map(str::trim) {
            Some(branch) if !branch.is_empty() => LocalSetup::Initialize(commit.on_branch(branch)),
            _ => LocalSetup::Initialize(commit),
        }
    }

    /// Returns the configured commit identity when both parts are present.
    #[must_use]
    pub fn commit_identity(&self) -> Option<CommitIdentity> {
        match (&self.author_name, &self.author_email) {
            (Some(name), Some(email)) => Some(CommitIdentity::new(name.clone(), email.clone())),
            _ => None,
        }
    }

    /// Chooses the remote backend for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackend`] for an unknown backend name.
    pub fn resolve_backend(
        &self,
        base_url: &Url,
        token: Option<&AccessToken>,
    ) -> Result<RemoteBackend, ConfigError> {
        match self.backend.as_deref() {
            Some(value) => value
                .parse()
                .map_err(|message| ConfigError::InvalidBackend { message }),
            None => Ok(RemoteBackend::infer(base_url, token)),
        }
    }

    /// Builds the workflow request.
    ///
    /// Visibility and base URL are passed through unchanged; the workflow
    /// validates them before any side effect.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the owner or name is missing or no
    /// destination directory is known.
    pub fn to_request(&self) -> Result<CreateRepositoryRequest, ConfigError> {
        let owner = self.resolve_owner()?;
        let directory = self.resolve_directory()?;
        Ok(CreateRepositoryRequest::new(
            owner,
            directory,
            self.visibility.clone(),
            self.remote_base_url.clone(),
        )
        .with_setup(self.local_setup()))
    }

    fn destination(&self) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(configured) = self.destination_dir.as_deref() {
            return Ok(Utf8PathBuf::from(configured));
        }
        dirs::home_dir()
            .and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
            .map(|home| home.join(DEFAULT_DESTINATION_LEAF))
            .ok_or(ConfigError::MissingDestination)
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests;
