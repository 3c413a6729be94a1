use super::{write_error, Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;

/// Lists the environment as `KEY=VALUE` lines, sorted by key.
#[derive(Clone, Copy)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        // raw bytes, so entries that are not UTF-8 print as they are
        for (key, value) in state.env().iter() {
            let parts: [&[u8]; 4] = [key.as_bytes(), b"=", value.as_bytes(), b"\n"];
            out.write_all(&parts.concat()).map_err(write_error)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use std::path::PathBuf;

    #[test]
    fn test_env_listing() {
        let mut env = EnvVarManager::new();
        env.set("PATH", "/usr/bin").unwrap();
        env.set("HOME", "/home/u").unwrap();
        let mut state = ShellState::new(PathBuf::from("/"), env);

        let mut out = Vec::new();
        EnvCommand.execute(&[], &mut state, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HOME=/home/u\nPATH=/usr/bin\n"
        );
    }

    #[test]
    fn test_env_empty() {
        let mut state = ShellState::new(PathBuf::from("/"), EnvVarManager::new());
        let mut out = Vec::new();
        EnvCommand.execute(&[], &mut state, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
