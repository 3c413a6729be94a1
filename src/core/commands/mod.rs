use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod echo;
mod environ;
mod exit;
mod pwd;
mod setenv;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use environ::EnvCommand;
pub use exit::ExitCommand;
pub use pwd::PwdCommand;
pub use setenv::SetEnvCommand;

use crate::core::state::ShellState;
use crate::error::os_description;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Malformed or missing builtin arguments.
    #[error("{command}: {message}")]
    InvalidArguments {
        command: &'static str,
        message: String,
    },
    /// A system call made on behalf of a builtin failed.
    #[error("{op}: {message}")]
    Os { op: &'static str, message: String },
}

impl CommandError {
    pub fn usage(command: &'static str, message: impl Into<String>) -> Self {
        CommandError::InvalidArguments {
            command,
            message: message.into(),
        }
    }

    pub fn io(op: &'static str, err: &std::io::Error) -> Self {
        CommandError::Os {
            op,
            message: os_description(err),
        }
    }
}

/// What the read-eval loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A builtin runs inside the interpreter: it never spawns a process and
/// never arms a deadline.
pub trait Command {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
pub enum CommandType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Echo(EchoCommand),
    Env(EnvCommand),
    SetEnv(SetEnvCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state, out),
            CommandType::Pwd(cmd) => cmd.execute(args, state, out),
            CommandType::Echo(cmd) => cmd.execute(args, state, out),
            CommandType::Env(cmd) => cmd.execute(args, state, out),
            CommandType::SetEnv(cmd) => cmd.execute(args, state, out),
            CommandType::Exit(cmd) => cmd.execute(args, state, out),
        }
    }
}

/// Fixed table of builtin names, matched exactly and case-sensitively.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand));
        commands.insert("echo", CommandType::Echo(EchoCommand));
        commands.insert("env", CommandType::Env(EnvCommand));
        commands.insert("setenv", CommandType::SetEnv(SetEnvCommand));

        Self { commands }
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandType> {
        self.commands.get(name)
    }

}

/// Maps a failed write to the interpreter's output.
pub(crate) fn write_error(err: std::io::Error) -> CommandError {
    CommandError::io("write", &err)
}
