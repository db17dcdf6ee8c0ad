use std::io;

use crate::core::commands::{split_command, Builtins, CommandContext};
use crate::core::SessionState;
use crate::highlight::Highlighter;
use crate::process::{ProcessRunner, Streams};

/// What the loop should do after one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Empty,
    Status(i32),
    Exit(i32),
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> LineOutcome;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> LineOutcome {
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        let mut streams = Streams::new(&mut stdout, &mut stderr);
        run_line(
            line,
            &mut self.state,
            &self.builtins,
            &self.runner,
            &self.highlighter,
            &mut streams,
        )
    }
}

/// Handles one line: `exit`, then built-ins, then the child shell.
///
/// Nothing here is fatal; a spawn failure is reported on the error stream and
/// recorded as status 1.
pub fn run_line(
    line: &str,
    state: &mut SessionState,
    builtins: &Builtins,
    runner: &ProcessRunner,
    highlighter: &Highlighter,
    streams: &mut Streams<'_>,
) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Empty;
    }

    let (name, args) = split_command(line);
    if name.eq_ignore_ascii_case("exit") {
        let code = if args.is_empty() {
            state.last_exit_code()
        } else {
            args.parse().unwrap_or(0)
        };
        return LineOutcome::Exit(code);
    }

    let mut ctx = CommandContext {
        state,
        runner,
        streams,
    };
    let code = match builtins.dispatch(line, &mut ctx) {
        Some(code) => code,
        None => match runner.execute(ctx.state, line, ctx.streams) {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!(error = ?e, "invocation failed");
                let message = highlighter.error(&e.to_string());
                if let Err(io) = writeln!(ctx.streams.err, "{}", message) {
                    tracing::warn!(error = %io, "failed to report process error");
                }
                1
            }
        },
    };

    if let Err(e) = ctx.streams.out.flush() {
        tracing::warn!(error = %e, "failed to flush output");
    }
    ctx.state.set_last_exit_code(code);
    LineOutcome::Status(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ShellDialect;

    struct Session {
        state: SessionState,
        builtins: Builtins,
        runner: ProcessRunner,
        out: Vec<u8>,
        err: Vec<u8>,
        _dir: tempfile::TempDir,
    }

    impl Session {
        fn new(runner: ProcessRunner) -> Self {
            let dir = tempfile::tempdir().expect("tempdir");
            Self {
                state: SessionState::new(dir.path()).expect("state"),
                builtins: Builtins::new(),
                runner,
                out: Vec::new(),
                err: Vec::new(),
                _dir: dir,
            }
        }

        fn line(&mut self, line: &str) -> LineOutcome {
            let mut streams = Streams::new(&mut self.out, &mut self.err);
            run_line(
                line,
                &mut self.state,
                &self.builtins,
                &self.runner,
                &Highlighter::plain(),
                &mut streams,
            )
        }
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut session = Session::new(ProcessRunner::default());
        assert_eq!(session.line("   "), LineOutcome::Empty);
        assert_eq!(session.state.last_exit_code(), 0);
    }

    #[test]
    fn test_exit_codes() {
        let mut session = Session::new(ProcessRunner::default());
        assert_eq!(session.line("exit"), LineOutcome::Exit(0));
        assert_eq!(session.line("EXIT 3"), LineOutcome::Exit(3));
        assert_eq!(session.line("exit nope"), LineOutcome::Exit(0));
    }

    #[test]
    fn test_builtin_status_is_recorded() {
        let mut session = Session::new(ProcessRunner::default());
        assert_eq!(session.line("cd does-not-exist"), LineOutcome::Status(1));
        assert_eq!(session.state.last_exit_code(), 1);
        assert_eq!(session.line("exit"), LineOutcome::Exit(1));
    }

    #[test]
    fn test_spawn_failure_keeps_loop_alive() {
        let program = "/nonexistent/pseudocmd-shell";
        let runner = ProcessRunner::with_program(program, ShellDialect::Posix);
        let mut session = Session::new(runner);
        assert_eq!(session.line("whatever"), LineOutcome::Status(1));
        let err = String::from_utf8_lossy(&session.err);
        assert!(err.contains("pseudocmd-shell"));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_session_state() {
        let mut session = Session::new(ProcessRunner::new(ShellDialect::Posix));
        std::fs::create_dir(session.state.cwd().join("sub")).expect("mkdir");

        assert_eq!(session.line("cd sub"), LineOutcome::Status(0));
        let set = session.line("set GREETING=hello there");
        assert_eq!(set, LineOutcome::Status(0));
        assert_eq!(
            session.line("printf '%s|' \"$GREETING\"; basename \"$(pwd)\"; exit 4"),
            LineOutcome::Status(4)
        );

        assert_eq!(String::from_utf8_lossy(&session.out), "hello there|sub\n");
        assert_eq!(session.state.last_exit_code(), 4);
    }
}
