use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("readline: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline: end of input")]
    InputClosed,
    #[error("getcwd: {0}")]
    WorkingDir(String),
    #[error("{0}")]
    Command(#[from] CommandError),
    #[error("{0}")]
    Process(#[from] ProcessError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("flag error: {0}")]
    Flag(String),
}

/// Returns the bare system error text of `err`, without the
/// ` (os error N)` suffix std appends to OS errors.
pub fn os_description(err: &std::io::Error) -> String {
    let text = err.to_string();
    match text.rfind(" (os error ") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}
