pub mod executor;
pub mod jobs;
pub mod redirect;
pub mod signal;
pub mod timeout;

pub use executor::{Launch, ProcessExecutor, WaitOutcome};
pub use jobs::BackgroundJobs;
pub use redirect::{Direction, RedirectSpec};
pub use signal::InterruptHandler;
pub use timeout::{Deadline, TimeoutAction};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// A redirection target could not be opened, or was missing.
    #[error("open: {0}")]
    Redirect(String),
    /// Process creation (`fork`), the child's `chdir`, or program
    /// replacement (`execvp`) failed.
    #[error("{op}: {message}")]
    Spawn { op: &'static str, message: String },
    #[error("execvp: missing command name")]
    EmptyCommand,
    #[error("wait: {0}")]
    Wait(String),
    #[error("kill: {0}")]
    Kill(String),
    #[error("write: {0}")]
    Output(String),
    #[error("signal: {0}")]
    Signal(String),
}

impl From<ctrlc::Error> for ProcessError {
    fn from(err: ctrlc::Error) -> Self {
        ProcessError::Signal(err.to_string())
    }
}

/// Re-runs a single test of this binary in a child process, with `marker`
/// set so the test knows to play the target side.
#[cfg(test)]
pub(crate) fn rerun_test(name: &str, marker: &str) -> std::process::Command {
    let exe = std::env::current_exe().unwrap();
    let mut command = std::process::Command::new(exe);
    command
        .args(["--exact", name, "--nocapture", "--test-threads=1"])
        .env(marker, "1");
    command
}
