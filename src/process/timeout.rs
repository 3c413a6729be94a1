use std::time::{Duration, Instant};

use serde::Deserialize;
use signal_hook::consts::SIGKILL;
use tracing::error;

/// What to terminate when a foreground command outlives its deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutAction {
    /// Kill the command that overran.
    #[default]
    Child,
    /// Kill the interpreter itself, leaving the child running. Kept for
    /// compatibility with the historical behaviour.
    Shell,
}

/// A one-shot deadline for a single external command.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }

    pub fn notice(&self) -> String {
        format!("Process timed out after {} seconds!", self.limit.as_secs())
    }
}

/// Sends SIGKILL to the running interpreter.
pub fn kill_interpreter() -> ! {
    if let Err(e) = signal_hook::low_level::raise(SIGKILL) {
        error!(error = %e, "failed to raise SIGKILL");
    }
    std::process::abort()
}
