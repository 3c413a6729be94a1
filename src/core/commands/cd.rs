use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::path::PathExpander;
use std::fs;
use std::io::{self, Write};

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let path_str = args
            .first()
            .ok_or_else(|| CommandError::usage("cd", "missing argument"))?;

        let expanded = self
            .path_expander
            .expand(path_str, state.env().get("HOME"))
            .map_err(|e| CommandError::Os {
                op: "cd",
                message: e.to_string(),
            })?;

        let target = fs::canonicalize(state.resolve(expanded))
            .map_err(|e| CommandError::io("cd", &e))?;
        if !target.is_dir() {
            return Err(CommandError::io(
                "cd",
                &io::Error::from_raw_os_error(libc::ENOTDIR),
            ));
        }
        // stat through the directory needs search permission, like chdir
        fs::metadata(target.join(".")).map_err(|e| CommandError::io("cd", &e))?;

        state.set_current_dir(target);
        Ok(Flow::Continue)
    }
}
