use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

mod engine;

pub use engine::Interpreter;

use crate::{
    core::{
        commands::Flow,
        config::{ConfigLoader, ConfigPaths},
        state::ShellState,
    },
    error::ShellError,
    flags::Flags,
    highlight::Highlighter,
    process::InterruptHandler,
};

/// The interactive front end: prompt, line reading and error reporting
/// around an [`Interpreter`].
pub struct Shell {
    editor: DefaultEditor,
    interpreter: Interpreter,
    interrupts: InterruptHandler,
    highlighter: Highlighter,
    quiet: bool,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let paths = ConfigPaths::new(flags.get_value("config").map(String::as_str));
        let config = ConfigLoader::new(&paths).load(&flags)?;
        debug!(?config, "configuration loaded");

        let state = ShellState::capture()?;
        let quiet = flags.is_set("quiet");

        let interrupts = InterruptHandler::new(quiet);
        interrupts.install()?;

        Ok(Shell {
            editor: DefaultEditor::new()?,
            interpreter: Interpreter::new(config, state),
            interrupts,
            highlighter: Highlighter::new(),
            quiet,
        })
    }

    /// Runs until `exit`. Losing the input stream is fatal.
    pub fn run(&mut self) -> Result<(), ShellError> {
        info!(cwd = %self.interpreter.state().current_dir().display(), "shell started");

        loop {
            let prompt = self.interpreter.prompt();
            self.interrupts.set_prompt(&prompt);

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    // not locked: the interrupt handler writes to stdout too
                    let mut out = io::stdout();
                    let result = self.interpreter.eval(&line, &mut out);
                    out.flush()?;

                    match result {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => eprintln!("{}", self.highlighter.error(&e.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if !self.quiet {
                        println!("{}", self.highlighter.notice(&InterruptHandler::notice()));
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => return Err(ShellError::InputClosed),
                Err(e) => return Err(e.into()),
            }
        }

        info!("shell exiting");
        Ok(())
    }
}
