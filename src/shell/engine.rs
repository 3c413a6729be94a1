use std::io::Write;

use tracing::debug;

use crate::core::commands::{Builtins, Command, Flow};
use crate::core::config::ShellConfig;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::input::{CommandLine, Tokenizer};
use crate::process::{BackgroundJobs, Deadline, ProcessExecutor};

/// Evaluates one line at a time against an explicit [`ShellState`].
pub struct Interpreter {
    state: ShellState,
    config: ShellConfig,
    tokenizer: Tokenizer,
    builtins: Builtins,
    executor: ProcessExecutor,
    jobs: BackgroundJobs,
}

impl Interpreter {
    pub fn new(config: ShellConfig, state: ShellState) -> Self {
        Self {
            tokenizer: config.tokenizer(),
            executor: ProcessExecutor::new(&config),
            builtins: Builtins::new(),
            jobs: BackgroundJobs::new(),
            state,
            config,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn prompt(&self) -> String {
        self.state.prompt()
    }

    pub fn background_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Runs one input line. Errors are per-command: the caller reports them
    /// and keeps looping.
    pub fn eval(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ShellError> {
        self.jobs.reap();

        let Some(command_line) = CommandLine::parse(line, &self.tokenizer) else {
            return Ok(Flow::Continue);
        };

        if let Some(builtin) = self.builtins.lookup(command_line.name()) {
            debug!(builtin = command_line.name(), "running builtin");
            return Ok(builtin.execute(command_line.args(), &mut self.state, out)?);
        }

        // a fresh deadline per external command; builtins never get one
        let deadline = Deadline::after(self.config.timeout());
        let launch = self.executor.launch(
            command_line.tokens(),
            command_line.is_background(),
            deadline,
            &self.state,
            &mut self.jobs,
            out,
        )?;
        debug!(?launch, "external command done");

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvVarManager;
    use crate::process::ProcessError;
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn interpreter_in(dir: &Path) -> Interpreter {
        let mut env = EnvVarManager::from_process();
        env.set("HOME", "/home/u").unwrap();
        Interpreter::new(
            ShellConfig::default(),
            ShellState::new(dir.canonicalize().unwrap(), env),
        )
    }

    fn eval(interpreter: &mut Interpreter, line: &str) -> (Result<Flow, ShellError>, String) {
        let mut out = Vec::new();
        let result = interpreter.eval(line, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_empty_line_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());
        let (result, out) = eval(&mut interpreter, "   ");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn test_echo_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());
        let (result, out) = eval(&mut interpreter, "echo $HOME");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "/home/u\n");
    }

    #[test]
    fn test_setenv_env_echo() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        eval(&mut interpreter, "setenv K V").0.unwrap();
        let (_, listing) = eval(&mut interpreter, "env");
        assert!(listing.lines().any(|line| line == "K=V"));
        let (_, echoed) = eval(&mut interpreter, "echo $K");
        assert_eq!(echoed, "V\n");
    }

    #[test]
    fn test_setenv_reaches_children() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        eval(&mut interpreter, "setenv VESSEL_FROM_SETENV yes").0.unwrap();
        eval(&mut interpreter, "printenv VESSEL_FROM_SETENV > value.txt").0.unwrap();

        let value = fs::read_to_string(dir.path().join("value.txt")).unwrap();
        assert_eq!(value, "yes\n");
    }

    #[test]
    fn test_cd_and_pwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let (_, before) = eval(&mut interpreter, "pwd");
        let (_, before_again) = eval(&mut interpreter, "pwd");
        assert_eq!(before, before_again);

        let (result, _) = eval(&mut interpreter, "cd /no/such/dir");
        assert!(matches!(result, Err(ShellError::Command(_))));
        let (_, unchanged) = eval(&mut interpreter, "pwd");
        assert_eq!(before, unchanged);

        eval(&mut interpreter, "cd nested").0.unwrap();
        let (_, after) = eval(&mut interpreter, "pwd");
        assert_eq!(after.trim_end(), format!("{}/nested", before.trim_end()));
        assert_eq!(interpreter.prompt(), format!("{}> ", after.trim_end()));
    }

    #[test]
    fn test_non_utf8_env_reaches_children() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("VESSEL_RAW_BYTES", OsStr::from_bytes(b"a\xffb"));
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        eval(&mut interpreter, "sh -c env > env.txt").0.unwrap();
        let listing = fs::read(dir.path().join("env.txt")).unwrap();
        assert!(listing
            .split(|b| *b == b'\n')
            .any(|line| line == b"VESSEL_RAW_BYTES=a\xffb"));
    }

    #[test]
    fn test_cd_refuses_unsearchable_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o600)).unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let searchable = fs::metadata(locked.join(".")).is_ok();
        let (_, before) = eval(&mut interpreter, "pwd");
        let (cd, _) = eval(&mut interpreter, "cd locked");
        let (_, after) = eval(&mut interpreter, "pwd");
        let (next, _) = eval(&mut interpreter, "true");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if searchable {
            return;
        }

        assert_eq!(cd.unwrap_err().to_string(), "cd: Permission denied");
        assert_eq!(before, after);
        assert_eq!(next.unwrap(), Flow::Continue);
    }

    #[test]
    fn test_copy_with_redirection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("in.txt"), b"\x00binary\xffbytes\n").unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let (result, out) = eval(&mut interpreter, "cat < in.txt > out.txt");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(
            fs::read(dir.path().join("out.txt")).unwrap(),
            b"\x00binary\xffbytes\n"
        );
    }

    #[test]
    fn test_redirection_is_relative_to_cd() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("work")).unwrap();
        let mut interpreter = interpreter_in(dir.path());

        eval(&mut interpreter, "cd work").0.unwrap();
        eval(&mut interpreter, "ls > listing.txt").0.unwrap();
        assert!(dir.path().join("work/listing.txt").exists());
    }

    #[test]
    fn test_missing_program_keeps_looping() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let (result, _) = eval(&mut interpreter, "badcmd123");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ShellError::Process(ProcessError::Spawn { op: "execvp", .. })
        ));

        let (result, out) = eval(&mut interpreter, "echo still here");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "still here\n");
    }

    #[test]
    fn test_background_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let started = Instant::now();
        let (result, out) = eval(&mut interpreter, "sleep 2 &");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(out.starts_with("Running in background [pid "));
        assert_eq!(interpreter.background_jobs(), 1);
    }

    #[test]
    fn test_builtin_ignores_background_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());

        let (result, out) = eval(&mut interpreter, "echo hi &");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "hi\n");
        assert_eq!(interpreter.background_jobs(), 0);
    }

    #[test]
    fn test_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut interpreter = interpreter_in(dir.path());
        assert_eq!(eval(&mut interpreter, "exit").0.unwrap(), Flow::Exit);
    }

    #[test]
    fn test_timeout_returns_to_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = EnvVarManager::from_process();
        env.set("HOME", "/home/u").unwrap();
        let config = ShellConfig {
            timeout_secs: 1,
            ..ShellConfig::default()
        };
        let mut interpreter = Interpreter::new(config, ShellState::new(dir.path().to_path_buf(), env));

        let started = Instant::now();
        let (result, out) = eval(&mut interpreter, "sleep 20");
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(out.contains("Process timed out after 1 seconds!"));
    }
}
