use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};

mod executor;

pub use executor::{run_line, LineOutcome};

use crate::{
    core::{commands::Builtins, config::Config, SessionState},
    error::ShellError,
    highlight::Highlighter,
    process::{signal::setup_interrupt_handler, ProcessRunner},
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) state: SessionState,
    pub(crate) builtins: Builtins,
    pub(crate) runner: ProcessRunner,
    pub(crate) config: Config,
    pub(crate) highlighter: Highlighter,
}

impl Shell {
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;
        editor.set_auto_add_history(false);

        if let Some(path) = &config.history_path {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(error = %e, path = %path.display(), "could not load history");
                }
            }
        }

        setup_interrupt_handler()?;

        Ok(Shell {
            editor,
            state: SessionState::from_home()?,
            builtins: Builtins::new(),
            runner: config.runner(),
            config,
            highlighter: Highlighter::new(),
        })
    }

    /// Runs the startup script and then the interactive loop; returns the
    /// code the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if !self.config.quiet {
            self.print_banner();
        }

        if let Some(code) = self.run_startup() {
            return Ok(code);
        }

        let code = loop {
            let prompt = self.state.render_prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "couldn't add to history");
                        }
                    }

                    if let LineOutcome::Exit(code) = self.execute_command(&line) {
                        break code;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break self.state.last_exit_code(),
                Err(e) => {
                    eprintln!("{}", self.highlighter.error(&format!("Error: {}", e)));
                    continue;
                }
            }
        };

        self.save_history();
        Ok(code)
    }

    /// `Some(code)` when a startup line asked to exit.
    fn run_startup(&mut self) -> Option<i32> {
        let lines = match self.config.startup_lines() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, "skipping startup script");
                eprintln!("{}", self.highlighter.error(&e.to_string()));
                return None;
            }
        };

        for line in lines {
            match self.execute_command(&line) {
                LineOutcome::Exit(code) => return Some(code),
                LineOutcome::Status(code) if code != 0 => {
                    tracing::warn!(%line, code, "startup line failed");
                }
                _ => {}
            }
        }
        None
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.config.history_path {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!(error = %e, path = %path.display(), "could not save history");
            }
        }
    }

    fn print_banner(&self) {
        println!("PseudoCmd {}", env!("CARGO_PKG_VERSION"));
        println!(
            "{}",
            self.highlighter.hint(&format!(
                "Commands run through {}. Type help for built-ins.",
                self.runner.program().to_string_lossy()
            ))
        );
        println!();
    }
}
