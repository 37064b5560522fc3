//! Yes/no confirmation on the terminal.

use std::io::{BufRead, Write};

use super::CliError;

/// Asks `question` and reads one answer line.
///
/// An empty answer accepts the default of yes; end of input declines.
pub fn confirm<R, W>(reader: &mut R, writer: &mut W, question: &str) -> Result<bool, CliError>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{question} [Y/n] ")?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "" | "y" | "yes"
    ))
}
