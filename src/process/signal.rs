use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use signal_hook::consts::SIGINT;
use tracing::debug;

use crate::process::ProcessError;

/// Keeps Ctrl-C from terminating the interpreter. The handler only touches
/// its own prompt copy and counter; the foreground deadline is unaffected.
#[derive(Clone, Default)]
pub struct InterruptHandler {
    prompt: Arc<Mutex<String>>,
    received: Arc<AtomicUsize>,
    quiet: bool,
}

impl InterruptHandler {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Self::default()
        }
    }

    /// Registers the SIGINT handler. May only succeed once per process.
    pub fn install(&self) -> Result<(), ProcessError> {
        let handler = self.clone();
        ctrlc::set_handler(move || {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let _ = handler.on_interrupt(&mut out);
        })?;
        Ok(())
    }

    pub fn set_prompt(&self, prompt: &str) {
        if let Ok(mut current) = self.prompt.lock() {
            *current = prompt.to_string();
        }
    }

    pub fn notice() -> String {
        format!("Caught signal {}. Use 'exit' to quit.", SIGINT)
    }

    /// Prints the notice and redraws the prompt, then lets whatever was
    /// interrupted carry on.
    pub fn on_interrupt(&self, out: &mut dyn Write) -> io::Result<()> {
        let count = self.received.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(count, "interrupt received");

        if !self.quiet {
            writeln!(out)?;
            writeln!(out, "{}", Self::notice())?;
        }
        let prompt = self
            .prompt
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default();
        write!(out, "{}", prompt)?;
        out.flush()
    }
}
