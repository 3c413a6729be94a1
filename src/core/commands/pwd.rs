use super::{write_error, Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::io::Write;

#[derive(Clone, Copy)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        writeln!(out, "{}", state.current_dir().display()).map_err(write_error)?;
        Ok(Flow::Continue)
    }
}
