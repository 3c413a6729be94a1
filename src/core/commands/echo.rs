use super::{write_error, Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::io::Write;

/// Prints its arguments separated by single spaces. A `$NAME` argument is
/// replaced by the variable's value, or nothing when unset.
#[derive(Clone, Copy)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let words: Vec<_> = args
            .iter()
            .map(|arg| state.env().expand_token(arg))
            .collect();

        writeln!(out, "{}", words.join(" ")).map_err(write_error)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use std::path::PathBuf;

    fn echo(args: &[&str]) -> String {
        let mut env = EnvVarManager::new();
        env.set("HOME", "/home/u").unwrap();
        let mut state = ShellState::new(PathBuf::from("/"), env);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();

        let mut out = Vec::new();
        EchoCommand.execute(&args, &mut state, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_echo_words() {
        assert_eq!(echo(&["hello", "world"]), "hello world\n");
    }

    #[test]
    fn test_echo_no_args() {
        assert_eq!(echo(&[]), "\n");
    }

    #[test]
    fn test_echo_variable() {
        assert_eq!(echo(&["$HOME"]), "/home/u\n");
        assert_eq!(echo(&["home", "is", "$HOME"]), "home is /home/u\n");
    }

    #[test]
    fn test_echo_unset_variable_is_empty() {
        assert_eq!(echo(&["[", "$NOPE", "]"]), "[  ]\n");
    }
}
