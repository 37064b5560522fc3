//! Command-line flow around the create-repository workflow.
//!
//! - [`output`]: Plan, summary and cancellation messages
//! - [`prompt`]: Yes/no confirmation
//!
//! Configuration is turned into an explicit request once, the plan is shown
//! and confirmed, and only then are adapters built and the workflow run.

use std::io::{self, Write};

use scaffold::remote::connect;
use scaffold::{
    ConfigError, CreateRepositoryError, Git2Vcs, RemoteHostError, ScaffoldConfig,
    ValidationError, create_repository,
};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod output;
pub mod prompt;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "SCAFFOLD_LOG";

/// Question asked before any side effect.
const CONFIRM_QUESTION: &str = "Create this repository?";

/// Errors surfaced by the CLI; each maps to exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration was missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested repository is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote backend could not be set up.
    #[error(transparent)]
    Remote(#[from] RemoteHostError),

    /// The workflow failed; cleanup failures are part of the message.
    #[error(transparent)]
    Workflow(#[from] CreateRepositoryError),

    /// Terminal input or output failed.
    #[error("terminal I/O failed: {message}")]
    Io {
        /// Error detail from the operating system.
        message: String,
    },
}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

/// Installs the stderr log subscriber.
///
/// Filter directives come from `SCAFFOLD_LOG`; without them only warnings
/// and errors are shown.
pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    // A subscriber may already be installed when embedded in another tool.
    let _ignored = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}

/// Loads configuration, confirms the plan and runs the workflow.
///
/// # Errors
///
/// Returns [`CliError`] for configuration, validation, adapter, workflow or
/// terminal failures. Declining the confirmation is not an error.
pub async fn run() -> Result<(), CliError> {
    let config = ScaffoldConfig::load_layers()?;
    let request = config.to_request()?;
    let repository = request.descriptor()?;
    let token = config.resolve_token();
    let backend = config.resolve_backend(repository.base_url(), token.as_ref())?;

    {
        let mut stdout = io::stdout().lock();
        output::write_plan_to(&mut stdout, &repository, backend, &request.setup)?;
        if !config.yes && !prompt::confirm(&mut io::stdin().lock(), &mut stdout, CONFIRM_QUESTION)? {
            output::write_cancelled_to(&mut stdout)?;
            return Ok(());
        }
        stdout.flush()?;
    }

    let remote = connect(backend, &repository, token.as_ref())?;
    let vcs = Git2Vcs::new()
        .with_token(token)
        .with_identity(config.commit_identity());
    let created = create_repository(remote.as_ref(), &vcs, &request).await?;

    output::write_summary_to(&mut io::stdout().lock(), &created)?;
    Ok(())
}
