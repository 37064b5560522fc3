//! Output formatting for the CLI.

use std::io::Write;

use scaffold::local::LocalSetup;
use scaffold::{RemoteBackend, RepositoryDescriptor};

use super::CliError;

/// Writes the plan shown before confirmation.
pub fn write_plan_to<W: Write>(
    writer: &mut W,
    repository: &RepositoryDescriptor,
    backend: RemoteBackend,
    setup: &LocalSetup,
) -> Result<(), CliError> {
    writeln!(writer, "Repository:  {}", repository.full_name())?;
    writeln!(writer, "Destination: {}", repository.directory())?;
    writeln!(writer, "Visibility:  {}", repository.visibility())?;
    writeln!(writer, "Remote:      {} (via {backend})", repository.remote_url())?;
    match setup {
        LocalSetup::Clone => writeln!(writer, "Local copy:  clone")?,
        LocalSetup::Initialize(commit) => {
            writeln!(writer, "Local copy:  initialise and push")?;
            writeln!(writer, "Commit:      {}", commit.message())?;
        }
    }
    Ok(())
}

/// Writes the success summary.
pub fn write_summary_to<W: Write>(
    writer: &mut W,
    repository: &RepositoryDescriptor,
) -> Result<(), CliError> {
    writeln!(writer, "Repository ready in {}", repository.directory())?;
    writeln!(writer, "Remote: {}", repository.remote_url())?;
    Ok(())
}

/// Writes the message shown when the user declines.
pub fn write_cancelled_to<W: Write>(writer: &mut W) -> Result<(), CliError> {
    writeln!(writer, "Cancelled.")?;
    Ok(())
}
