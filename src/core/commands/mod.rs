//! Built-in commands handled without spawning a child shell.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

mod cd;
mod cls;
mod echo;
mod prompt;
mod pwd;
mod set;

pub use cd::CdCommand;
pub use cls::ClsCommand;
pub use echo::EchoCommand;
pub use prompt::PromptCommand;
pub use pwd::PwdCommand;
pub use set::SetCommand;

use crate::core::SessionState;
use crate::path::PathError;
use crate::process::{ProcessError, ProcessRunner, Streams};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("The system cannot find the path specified.")]
    PathNotFound(PathBuf),
    #[error("Invalid syntax.")]
    InvalidSyntax,
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Everything a built-in may read or change while it runs.
pub struct CommandContext<'a, 'io> {
    pub state: &'a mut SessionState,
    pub runner: &'a ProcessRunner,
    pub streams: &'a mut Streams<'io>,
}

pub trait Command {
    fn name(&self) -> &'static str;
    fn help(&self) -> &'static str;
    /// `args` is the trimmed rest of the line. Returns the status, 0 on success.
    fn execute(&self, args: &str, ctx: &mut CommandContext) -> Result<i32, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Set(SetCommand),
    Cls(ClsCommand),
    Pwd(PwdCommand),
    Echo(EchoCommand),
    Prompt(PromptCommand),
}

impl CommandType {
    fn command(&self) -> &dyn Command {
        match self {
            CommandType::Cd(cmd) => cmd,
            CommandType::Set(cmd) => cmd,
            CommandType::Cls(cmd) => cmd,
            CommandType::Pwd(cmd) => cmd,
            CommandType::Echo(cmd) => cmd,
            CommandType::Prompt(cmd) => cmd,
        }
    }
}

/// Fixed table of built-ins, keyed by lower-cased name.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<String, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let table = [
            CommandType::Cd(CdCommand::new()),
            CommandType::Set(SetCommand::new()),
            CommandType::Cls(ClsCommand),
            CommandType::Pwd(PwdCommand),
            CommandType::Echo(EchoCommand),
            CommandType::Prompt(PromptCommand),
        ];
        let commands = table
            .into_iter()
            .map(|cmd| (cmd.command().name().to_string(), cmd))
            .collect();
        Self { commands }
    }

    /// Runs `line` if its first word names a built-in; `None` means "not mine".
    ///
    /// Failures are written to the error stream and reported as status 1.
    pub fn dispatch(&self, line: &str, ctx: &mut CommandContext) -> Option<i32> {
        let (name, args) = split_command(line);
        let name = name.to_lowercase();

        let result = if is_help(&name) {
            self.print_help(args, ctx.streams).map(|_| 0)
        } else {
            let cmd = self.commands.get(&name)?;
            tracing::debug!(command = %name, %args, "running built-in");
            cmd.command().execute(args, ctx)
        };

        Some(match result {
            Ok(code) => code,
            Err(e) => {
                if let Err(io) = writeln!(ctx.streams.err, "{}", e) {
                    tracing::warn!(error = %io, "failed to report built-in error");
                }
                1
            }
        })
    }

    fn print_help(&self, args: &str, streams: &mut Streams<'_>) -> Result<(), CommandError> {
        let out = &mut *streams.out;
        if args.is_empty() {
            writeln!(out, "Built-in commands:")?;
            for cmd in self.commands.values() {
                let cmd = cmd.command();
                writeln!(out, "  {:<8} {}", cmd.name(), cmd.help())?;
            }
            writeln!(out)?;
            writeln!(out, "Type: help <command>")?;
            return Ok(());
        }

        match self.commands.get(&args.to_lowercase()) {
            Some(cmd) => writeln!(out, "{}: {}", cmd.command().name(), cmd.command().help())?,
            None => writeln!(out, "Unknown command: {}", args)?,
        }
        Ok(())
    }
}

fn is_help(name: &str) -> bool {
    name == "help" || name == "?"
}

/// Splits off the first whitespace-delimited word; the rest is trimmed.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], line[i..].trim()),
        None => (line, ""),
    }
}
