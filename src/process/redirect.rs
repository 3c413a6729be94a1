//! Extraction of `<` / `>` operators from a command line and the files
//! they bind to a child's standard streams.
//!
//! For each direction only the first operator on the line is honored. Later
//! operators of the same direction are still removed from the argument
//! vector together with their target, but their files are never opened.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::ProcessError;
use crate::core::state::ShellState;
use crate::error::os_description;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Direction::Input),
            ">" => Some(Direction::Output),
            _ => None,
        }
    }
}

/// At most one target per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectSpec {
    pub stdin: Option<String>,
    pub stdout: Option<String>,
}

impl RedirectSpec {
    /// Splits `tokens` into the program argument vector and the redirections.
    pub fn extract(tokens: &[String]) -> Result<(Vec<String>, RedirectSpec), ProcessError> {
        let mut argv = Vec::with_capacity(tokens.len());
        let mut spec = RedirectSpec::default();
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            let Some(direction) = Direction::from_token(token) else {
                argv.push(token.clone());
                continue;
            };

            let target = iter
                .next()
                .ok_or_else(|| ProcessError::Redirect("missing redirection target".into()))?;

            let slot = match direction {
                Direction::Input => &mut spec.stdin,
                Direction::Output => &mut spec.stdout,
            };
            if slot.is_some() {
                warn!(operator = %token, target = %target, "ignoring repeated redirection");
            } else {
                *slot = Some(target.clone());
            }
        }

        Ok((argv, spec))
    }

    pub fn is_empty(&self) -> bool {
        self.stdin.is_none() && self.stdout.is_none()
    }

    /// Opens the targets relative to the shell's working directory.
    pub fn open(&self, state: &ShellState) -> Result<RedirectFiles, ProcessError> {
        let stdin = match &self.stdin {
            Some(target) => {
                let path = state.resolve(target);
                debug!(path = %path.display(), "redirecting stdin");
                Some(File::open(&path).map_err(|e| ProcessError::Redirect(os_description(&e)))?)
            }
            None => None,
        };

        let stdout = match &self.stdout {
            Some(target) => {
                let path = state.resolve(target);
                debug!(path = %path.display(), "redirecting stdout");
                Some(
                    OpenOptions::new()
                        .write(true)
                        .create(true)
                        .truncate(true)
                        .mode(0o644)
                        .open(&path)
                        .map_err(|e| ProcessError::Redirect(os_description(&e)))?,
                )
            }
            None => None,
        };

        Ok(RedirectFiles { stdin, stdout })
    }
}

/// Opened redirection targets. Ownership moves into the child's stdio, so
/// the interpreter's own descriptors are never rebound.
#[derive(Debug)]
pub struct RedirectFiles {
    stdin: Option<File>,
    stdout: Option<File>,
}

impl RedirectFiles {
    pub fn apply(self, command: &mut Command) {
        command.stdin(self.stdin.map_or_else(Stdio::inherit, Stdio::from));
        command.stdout(self.stdout.map_or_else(Stdio::inherit, Stdio::from));
        command.stderr(Stdio::inherit());
    }
}
