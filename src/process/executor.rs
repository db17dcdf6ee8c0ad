use std::ffi::OsString;
use std::path::Path;
use std::process::{Child, Stdio};
use std::thread;

use super::pump::pump;
use super::script::ScriptComposer;
use super::wait::{exit_code, wait_for_exit};
use super::{ProcessError, ShellDialect, Streams};
use crate::core::SessionState;

/// Owns the child for one invocation; kills and reaps it unless it was waited.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!(error = %e, "kill after failed wait");
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Runs composed scripts in a child shell and streams its output back.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: OsString,
    composer: ScriptComposer,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(ShellDialect::default())
    }
}

impl ProcessRunner {
    pub fn new(dialect: ShellDialect) -> Self {
        Self::with_program(dialect.default_program(), dialect)
    }

    pub fn with_program(program: impl Into<OsString>, dialect: ShellDialect) -> Self {
        Self {
            program: program.into(),
            composer: ScriptComposer::new(dialect),
        }
    }

    pub fn dialect(&self) -> ShellDialect {
        self.composer.dialect()
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    /// Runs `command` in a child that sees the session's cwd and overlay.
    pub fn execute(
        &self,
        state: &SessionState,
        command: &str,
        streams: &mut Streams<'_>,
    ) -> Result<i32, ProcessError> {
        let script = self.composer.compose(state.cwd(), state.env(), command);
        self.run(&script, state.cwd(), streams)
    }

    /// Spawns the shell on `script`, pumps stdout and stderr concurrently while
    /// waiting for exit, and returns the child's exit code once all three finish.
    pub fn run(
        &self,
        script: &str,
        cwd: &Path,
        streams: &mut Streams<'_>,
    ) -> Result<i32, ProcessError> {
        let mut command = self.dialect().command(&self.program, script);
        command
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let program = self.program.to_string_lossy();
        tracing::debug!(%program, cwd = %cwd.display(), "spawning child shell");
        tracing::debug!(%script, "composed script");

        let child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: program.into_owned(),
            source,
        })?;
        let mut guard = ChildGuard::new(child);

        let stdout = guard
            .child
            .stdout
            .take()
            .ok_or(ProcessError::MissingPipe("stdout"))?;
        let stderr = guard
            .child
            .stderr
            .take()
            .ok_or(ProcessError::MissingPipe("stderr"))?;

        let Streams { out, err } = streams;
        let status = thread::scope(|scope| {
            let out_pump = scope.spawn(move || pump(stdout, &mut **out));
            let err_pump = scope.spawn(move || pump(stderr, &mut **err));

            let status = wait_for_exit(&mut guard.child);
            if status.is_err() {
                // Pipes only close once the child is gone.
                guard.kill();
            }

            for (name, handle) in [("stdout", out_pump), ("stderr", err_pump)] {
                match handle.join() {
                    Ok(bytes) => tracing::trace!(stream = name, bytes, "pump finished"),
                    Err(_) => tracing::warn!(stream = name, "pump thread panicked"),
                }
            }
            status
        });

        let status = status.map_err(ProcessError::Wait)?;
        guard.reaped = true;

        let code = exit_code(status);
        tracing::debug!(code, "child shell exited");
        Ok(code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MISSING_SHELL: &str = "/nonexistent/pseudocmd-shell";

    fn posix_runner() -> ProcessRunner {
        ProcessRunner::new(ShellDialect::Posix)
    }

    fn run_captured(runner: &ProcessRunner, script: &str, cwd: &Path) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = runner
            .run(script, cwd, &mut Streams::new(&mut out, &mut err))
            .expect("run");
        (
            code,
            String::from_utf8(out).expect("utf-8 stdout"),
            String::from_utf8(err).expect("utf-8 stderr"),
        )
    }

    #[test]
    fn test_exit_code_and_streams() {
        let (code, out, err) = run_captured(
            &posix_runner(),
            "echo to-out; echo to-err >&2; exit 42",
            Path::new("/"),
        );
        assert_eq!(code, 42);
        assert_eq!(out, "to-out\n");
        assert_eq!(err, "to-err\n");
    }

    #[test]
    fn test_runs_in_given_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cwd = dir.path().canonicalize().expect("canonical dir");
        let (code, out, _) = run_captured(&posix_runner(), "pwd -P", &cwd);
        assert_eq!(code, 0);
        assert_eq!(PathBuf::from(out.trim_end()), cwd);
    }

    #[test]
    fn test_stdin_is_not_forwarded() {
        let (code, out, _) = run_captured(&posix_runner(), "cat; echo done", Path::new("/"));
        assert_eq!(code, 0);
        assert_eq!(out, "done\n");
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let runner = ProcessRunner::with_program(MISSING_SHELL, ShellDialect::Posix);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut streams = Streams::new(&mut out, &mut err);
        let result = runner.run("echo hi", Path::new("/"), &mut streams);
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_large_stderr_with_silent_stdout_does_not_hang() {
        let script = "i=0; while [ $i -lt 20000 ]; do echo \"line $i\" >&2; i=$((i+1)); done";
        let (code, out, err) = run_captured(&posix_runner(), script, Path::new("/"));
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert_eq!(err.lines().count(), 20000);
        assert_eq!(err.lines().last(), Some("line 19999"));
    }

    #[test]
    fn test_interleaved_output_keeps_per_stream_order() {
        let script = concat!(
            "awk 'BEGIN { for (i = 1; i <= 100000; i++) ",
            "{ print i; print i > \"/dev/stderr\" } exit 5 }'"
        );
        let (code, out, err) = run_captured(&posix_runner(), script, Path::new("/"));
        assert_eq!(code, 5);

        for stream in [&out, &err] {
            let lines: Vec<u32> = stream
                .lines()
                .map(|l| l.parse().expect("numeric line"))
                .collect();
            assert_eq!(lines.len(), 100000);
            assert!(lines.iter().enumerate().all(|(i, n)| *n == i as u32 + 1));
        }
    }

    #[test]
    fn test_overlay_does_not_leak_into_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = SessionState::new(dir.path()).expect("state");
        state.env_mut().set("PSEUDOCMD_ISOLATION_CHECK", "child-only");

        let script = "printf '%s' \"$PSEUDOCMD_ISOLATION_CHECK\"";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut streams = Streams::new(&mut out, &mut err);
        let code = posix_runner()
            .execute(&state, script, &mut streams)
            .expect("execute");

        assert_eq!(code, 0);
        assert_eq!(out, b"child-only");
        assert!(std::env::var("PSEUDOCMD_ISOLATION_CHECK").is_err());
    }
}
