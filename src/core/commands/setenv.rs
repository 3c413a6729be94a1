use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::io::Write;

/// `setenv KEY VALUE`. Extra arguments are ignored.
#[derive(Clone, Copy)]
pub struct SetEnvCommand;

impl Command for SetEnvCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let (Some(name), Some(value)) = (args.first(), args.get(1)) else {
            return Err(CommandError::usage("setenv", "missing arguments"));
        };

        state
            .env_mut()
            .set(name, value)
            .map_err(|e| CommandError::Os {
                op: "setenv",
                message: e.to_string(),
            })?;
        Ok(Flow::Continue)
    }
}
