//! ui::prompts
//!
//! Interactive prompts.
//!
//! Prompts are only shown in interactive mode. Without a terminal,
//! operations needing input fail with [`PromptError::NotInteractive`].

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

use crate::auth::VerifierPrompt;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// True when stdin is attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Read one trimmed line. End of input counts as cancellation.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim().to_string())
}

/// Prompt for text input.
///
/// An empty answer yields `default` when one is given.
pub fn input(message: &str, default: Option<&str>, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let mut stderr = io::stderr();
    match default {
        Some(d) => write!(stderr, "{} [{}]: ", message, d)?,
        None => write!(stderr, "{}: ", message)?,
    }
    stderr.flush()?;

    let answer = read_answer(&mut io::stdin().lock())?;
    match (answer.is_empty(), default) {
        (true, Some(d)) => Ok(d.to_string()),
        _ => Ok(answer),
    }
}

/// Prompt for masked input (API secrets). Not echoed.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let value = rpassword::prompt_password(format!("{}: ", message))?;
    Ok(value.trim().to_string())
}

/// Verifier prompt that shows the authorization URL on stderr and reads
/// the code from stdin.
#[derive(Debug, Clone)]
pub struct TerminalVerifierPrompt {
    /// Try to open the URL in a browser as well
    pub open_browser: bool,
    pub interactive: bool,
}

impl VerifierPrompt for TerminalVerifierPrompt {
    fn verifier(&mut self, url: &str, attempt: u32) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        if attempt > 1 {
            eprintln!("That code was not accepted. Requesting a new authorization link.");
        }
        eprintln!("Open this URL to authorize trello_cli:\n\n  {}\n", url);
        if self.open_browser {
            if let Err(e) = open::that(url) {
                tracing::debug!(error = %e, "could not open browser");
            }
        }
        input("Verification code", None, self.interactive)
    }
}
