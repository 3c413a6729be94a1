use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::io::Write;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_exit_command() {
        let cmd = ExitCommand::new();
        let mut state = ShellState::new(PathBuf::from("/"), EnvVarManager::new());

        let flow = cmd.execute(&[], &mut state, &mut io::sink()).unwrap();
        assert_eq!(flow, Flow::Exit);
    }
}
