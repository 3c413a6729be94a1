use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::redirect::RedirectSpec;
use super::timeout::{kill_interpreter, Deadline, TimeoutAction};
use super::{BackgroundJobs, ProcessError};
use crate::core::config::ShellConfig;
use crate::core::state::ShellState;
use crate::error::os_description;

/// Result of launching an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Foreground(WaitOutcome),
    Background { pid: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut { pid: u32 },
}

#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    poll_interval: Duration,
    timeout_action: TimeoutAction,
}

impl ProcessExecutor {
    pub fn new(config: &ShellConfig) -> Self {
        ProcessExecutor {
            poll_interval: config.poll_interval(),
            timeout_action: config.timeout_action,
        }
    }

    /// Runs `tokens` as an external program. Redirections are stripped from
    /// the arguments and bound to the child's stdio only.
    pub fn launch(
        &self,
        tokens: &[String],
        background: bool,
        deadline: Deadline,
        state: &ShellState,
        jobs: &mut BackgroundJobs,
        out: &mut dyn Write,
    ) -> Result<Launch, ProcessError> {
        let (argv, redirects) = RedirectSpec::extract(tokens)?;
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        let files = redirects.open(state)?;

        let mut command = Command::new(Self::program_path(program, state));
        command
            .args(args)
            .current_dir(state.current_dir())
            .env_clear()
            .envs(state.env().iter());
        files.apply(&mut command);

        let mut child = command
            .spawn()
            .map_err(|e| spawn_error(e, state.current_dir()))?;
        let pid = child.id();
        debug!(pid, program = %program, background, "spawned");

        if background {
            jobs.insert(child);
            writeln!(out, "Running in background [pid {}]", pid).map_err(output_error)?;
            return Ok(Launch::Background { pid });
        }

        let outcome = self.wait(&mut child, deadline)?;
        match outcome {
            WaitOutcome::Exited(status) => debug!(pid, %status, "foreground job finished"),
            WaitOutcome::TimedOut { .. } => self.enforce_timeout(&mut child, deadline, out)?,
        }
        Ok(Launch::Foreground(outcome))
    }

    /// Blocks until `child` exits or `deadline` passes, whichever is first.
    pub fn wait(&self, child: &mut Child, deadline: Deadline) -> Result<WaitOutcome, ProcessError> {
        loop {
            if let Some(status) = child
                .try_wait()
                .map_err(|e| ProcessError::Wait(os_description(&e)))?
            {
                return Ok(WaitOutcome::Exited(status));
            }

            if deadline.expired() {
                return Ok(WaitOutcome::TimedOut { pid: child.id() });
            }

            thread::sleep(self.poll_interval.min(deadline.remaining()));
        }
    }

    fn enforce_timeout(
        &self,
        child: &mut Child,
        deadline: Deadline,
        out: &mut dyn Write,
    ) -> Result<(), ProcessError> {
        warn!(pid = child.id(), limit = ?deadline.limit(), action = ?self.timeout_action, "command timed out");
        writeln!(out, "\n{}", deadline.notice()).map_err(output_error)?;
        out.flush().map_err(output_error)?;

        match self.timeout_action {
            TimeoutAction::Child => {
                child
                    .kill()
                    .map_err(|e| ProcessError::Kill(os_description(&e)))?;
                child
                    .wait()
                    .map_err(|e| ProcessError::Wait(os_description(&e)))?;
                Ok(())
            }
            TimeoutAction::Shell => kill_interpreter(),
        }
    }

    fn program_path(program: &str, state: &ShellState) -> std::path::PathBuf {
        // bare names go through PATH; anything with a slash is a path
        if program.contains('/') {
            state.resolve(program)
        } else {
            Path::new(program).to_path_buf()
        }
    }
}

/// Names the step that failed. std reports a failed child `chdir` the same
/// way as a failed exec; an unenterable working directory means `chdir`.
fn spawn_error(err: io::Error, cwd: &Path) -> ProcessError {
    let op = match err.raw_os_error() {
        Some(libc::EAGAIN) | Some(libc::ENOMEM) => "fork",
        _ if fs::metadata(cwd.join(".")).is_err() => "chdir",
        _ => "execvp",
    };
    ProcessError::Spawn {
        op,
        message: os_description(&err),
    }
}

fn output_error(err: io::Error) -> ProcessError {
    ProcessError::Output(os_description(&err))
}
