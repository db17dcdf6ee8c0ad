use std::path::Path;

use super::quote::{quote_assignment, quote_path};
use super::ShellDialect;
use crate::core::env::EnvOverlay;

/// Builds the one-line script that recreates the session inside a child shell.
///
/// Segments, joined by the dialect's unconditional separator:
/// locale reset, change of directory, one assignment per overlay entry and
/// finally the user's command exactly as typed.
#[derive(Debug, Clone, Copy)]
pub struct ScriptComposer {
    dialect: ShellDialect,
}

impl ScriptComposer {
    pub fn new(dialect: ShellDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> ShellDialect {
        self.dialect
    }

    pub fn compose(&self, cwd: &Path, env: &EnvOverlay, command: &str) -> String {
        let separator = self.dialect.separator();
        let cwd = cwd.to_string_lossy();

        let mut script = String::with_capacity(command.len() + cwd.len() + 64);
        script.push_str(self.dialect.locale_reset());
        script.push_str(separator);
        script.push_str(&self.dialect.change_dir(&quote_path(self.dialect, &cwd)));
        script.push_str(separator);

        for (name, value) in env.iter() {
            let assignment = quote_assignment(self.dialect, name, value);
            script.push_str(&self.dialect.assign(&assignment));
            script.push_str(separator);
        }

        script.push_str(command);
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_compose_cmd_without_overlay() {
        let composer = ScriptComposer::new(ShellDialect::Cmd);
        let cwd = PathBuf::from("C:\\Users\\u");
        let script = composer.compose(&cwd, &EnvOverlay::new(), "dir /b");
        assert_eq!(script, "chcp 65001>nul & cd /d \"C:\\Users\\u\" & dir /b");
    }

    #[test]
    fn test_compose_cmd_with_overlay() {
        let mut env = EnvOverlay::new();
        env.set("A", "1");
        env.set("B", "x & y");

        let composer = ScriptComposer::new(ShellDialect::Cmd);
        let script = composer.compose(&PathBuf::from("C:\\a \"b\""), &env, "echo %A%");

        assert_eq!(
            script,
            "chcp 65001>nul & cd /d \"C:\\a \"\"b\"\"\" & set \"A=1\" & set \"B=x & y\" & echo %A%"
        );
    }

    #[test]
    fn test_user_command_is_verbatim() {
        let composer = ScriptComposer::new(ShellDialect::Posix);
        let command = "echo \"$HOME\" && ls | wc -l > out.txt";
        let script = composer.compose(&PathBuf::from("/tmp"), &EnvOverlay::new(), command);
        let preamble = "export LC_CTYPE=C.UTF-8 >/dev/null 2>&1 ; cd -- ";
        assert!(script.starts_with(preamble));
        assert!(script.ends_with(command));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let mut env = EnvOverlay::new();
        env.set("zeta", "1");
        env.set("Alpha", "2");
        let composer = ScriptComposer::new(ShellDialect::Cmd);
        let cwd = PathBuf::from("C:\\");
        assert_eq!(
            composer.compose(&cwd, &env, "ver"),
            composer.compose(&cwd, &env, "ver")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_posix_script_recreates_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cwd = dir.path().canonicalize().expect("canonical dir");

        let mut env = EnvOverlay::new();
        env.set("PSEUDOCMD_GREETING", "hello; world & \"friends\"");

        let composer = ScriptComposer::new(ShellDialect::Posix);
        let script = composer.compose(&cwd, &env, "pwd -P; printf '%s' \"$PSEUDOCMD_GREETING\"");

        let output = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(&script)
            .current_dir("/")
            .output()
            .expect("spawn /bin/sh");
        let stdout = String::from_utf8(output.stdout).expect("utf-8 output");

        assert_eq!(
            stdout,
            format!("{}\nhello; world & \"friends\"", cwd.display())
        );
    }
}
