//! Remote host that shells out to the `gh` command-line client.

use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use crate::repository::RepositoryDescriptor;

use super::RemoteHost;
use super::error::RemoteHostError;

const DEFAULT_PROGRAM: &str = "gh";
const PUBLIC_HOST: &str = "github.com";

/// Command line passed to the external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GhCommandSpec {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
}

/// Remote host driven by an authenticated `gh` installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhCliRemoteHost {
    program: String,
    host: Option<String>,
}

impl Default for GhCliRemoteHost {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            host: None,
        }
    }
}

impl GhCliRemoteHost {
    /// Targets the host of `base_url`, exporting `GH_HOST` for anything other
    /// than the public service.
    #[must_use]
    pub fn for_base_url(base_url: &Url) -> Self {
        let host = base_url
            .host_str()
            .filter(|host| !host.eq_ignore_ascii_case(PUBLIC_HOST))
            .map(ToOwned::to_owned);
        Self {
            host,
            ..Self::default()
        }
    }

    /// Replaces the executable, e.g. with an absolute path to `gh`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub(crate) fn create_spec(&self, repository: &RepositoryDescriptor) -> GhCommandSpec {
        self.spec([
            "repo".to_owned(),
            "create".to_owned(),
            repository.full_name(),
            format!("--{}", repository.visibility()),
        ])
    }

    pub(crate) fn delete_spec(&self, repository: &RepositoryDescriptor) -> GhCommandSpec {
        self.spec([
            "repo".to_owned(),
            "delete".to_owned(),
            repository.full_name(),
            "--yes".to_owned(),
        ])
    }

    fn spec(&self, args: impl IntoIterator<Item = String>) -> GhCommandSpec {
        GhCommandSpec {
            program: self.program.clone(),
            args: args.into_iter().collect(),
        }
    }

    async fn run(&self, spec: &GhCommandSpec) -> Result<(), String> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(host) = &self.host {
            command.env("GH_HOST", host);
        }

        tracing::debug!(program = %spec.program, args = ?spec.args, "running remote host command");
        let output = command
            .output()
            .await
            .map_err(|error| format!("failed to run {}: {error}", spec.program))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(describe_failure(&spec.program, &output))
        }
    }
}

fn describe_failure(program: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    if detail.is_empty() {
        format!("{program} exited with {}", output.status)
    } else {
        format!("{program} exited with {}: {detail}", output.status)
    }
}

#[async_trait]
impl RemoteHost for GhCliRemoteHost {
    async fn create_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        self.run(&self.create_spec(repository))
            .await
            .map_err(|message| RemoteHostError::create(repository.full_name(), message))
    }

    async fn delete_remote(&self, repository: &RepositoryDescriptor) -> Result<(), RemoteHostError> {
        self.run(&self.delete_spec(repository))
            .await
            .map_err(|message| RemoteHostError::delete(repository.full_name(), message))
    }
}
