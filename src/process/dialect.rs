use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use super::quote::sh_quote;

/// Grammar of the child shell every non-built-in line is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    /// `cmd.exe /d /q /s /c <script>`
    Cmd,
    /// `/bin/sh -c <script>`
    Posix,
}

impl Default for ShellDialect {
    fn default() -> Self {
        if cfg!(windows) {
            ShellDialect::Cmd
        } else {
            ShellDialect::Posix
        }
    }
}

impl ShellDialect {
    pub fn default_program(&self) -> &'static str {
        match self {
            ShellDialect::Cmd => "cmd.exe",
            ShellDialect::Posix => "/bin/sh",
        }
    }

    /// Unconditional "run the next one regardless" operator, padded with spaces.
    pub fn separator(&self) -> &'static str {
        match self {
            ShellDialect::Cmd => " & ",
            ShellDialect::Posix => " ; ",
        }
    }

    /// Switches the child's output encoding to UTF-8 without printing anything.
    pub fn locale_reset(&self) -> &'static str {
        match self {
            ShellDialect::Cmd => "chcp 65001>nul",
            ShellDialect::Posix => "export LC_CTYPE=C.UTF-8 >/dev/null 2>&1",
        }
    }

    pub fn change_dir(&self, quoted_path: &str) -> String {
        match self {
            ShellDialect::Cmd => format!("cd /d {}", quoted_path),
            ShellDialect::Posix => format!("cd -- {}", quoted_path),
        }
    }

    pub fn assign(&self, quoted_assignment: &str) -> String {
        match self {
            ShellDialect::Cmd => format!("set {}", quoted_assignment),
            ShellDialect::Posix => format!("export {}", quoted_assignment),
        }
    }

    /// Command that lists the child's variables whose names start with `name`.
    ///
    /// When nothing matches it fails with cmd's "not defined" message on stderr.
    pub fn query_variable(&self, name: &str) -> String {
        match self {
            ShellDialect::Cmd => format!("set {}", name),
            ShellDialect::Posix => format!(
                "env | grep -i -- {} || {{ printf '%s\\n' {} >&2; false; }}",
                sh_quote(&anchored_pattern(name)),
                sh_quote(&format!("Environment variable {} not defined", name))
            ),
        }
    }

    /// Builds the spawn command for `script` without touching stdio or cwd.
    pub fn command(&self, program: &OsString, script: &str) -> Command {
        let mut command = Command::new(program);
        match self {
            ShellDialect::Cmd => {
                #[cfg(windows)]
                {
                    use std::os::windows::process::CommandExt;
                    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
                    command
                        .raw_arg("/d /q /s /c")
                        .raw_arg(script)
                        .creation_flags(CREATE_NO_WINDOW);
                }
                #[cfg(not(windows))]
                {
                    command.args(["/d", "/q", "/s", "/c", script]);
                }
            }
            ShellDialect::Posix => {
                command.arg("-c").arg(script);
            }
        }
        command
    }

    /// Guesses the dialect from a shell program path such as `C:\Windows\cmd.exe`.
    pub fn for_program(program: &Path) -> Self {
        let program = program.to_string_lossy().to_ascii_lowercase();
        // Split on both separators so Windows paths are read correctly anywhere.
        let base = program.rsplit(['/', '\\']).next().unwrap_or_default();
        match base.strip_suffix(".exe").unwrap_or(base) {
            "cmd" => ShellDialect::Cmd,
            _ => ShellDialect::Posix,
        }
    }
}

// Basic regex matching names that start with `name` literally.
fn anchored_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 1);
    pattern.push('^');
    for ch in name.chars() {
        if matches!(ch, '.' | '[' | ']' | '*' | '\\' | '^' | '$') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern
}
