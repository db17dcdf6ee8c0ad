use std::path::{Path, PathBuf};

use super::commands::CommandError;
use super::env::EnvOverlay;
use super::prompt;

pub const DEFAULT_PROMPT: &str = "$P$G";

/// Per-session record of working directory, variable overlay and prompt.
///
/// `cwd` always names an existing directory: it is only replaced through
/// [`SessionState::set_cwd`], which checks the target first.
#[derive(Clone, Debug)]
pub struct SessionState {
    cwd: PathBuf,
    env: EnvOverlay,
    prompt_format: String,
    last_exit_code: i32,
}

impl SessionState {
    pub fn new(cwd: impl AsRef<Path>) -> Result<Self, CommandError> {
        let cwd = cwd.as_ref();
        if !cwd.is_dir() {
            return Err(CommandError::PathNotFound(cwd.to_path_buf()));
        }
        Ok(Self {
            cwd: cwd.to_path_buf(),
            env: EnvOverlay::new(),
            prompt_format: DEFAULT_PROMPT.to_string(),
            last_exit_code: 0,
        })
    }

    /// Starts in the home directory, falling back to the process cwd.
    pub fn from_home() -> Result<Self, CommandError> {
        match dirs::home_dir().filter(|home| home.is_dir()) {
            Some(home) => Self::new(home),
            None => Self::new(std::env::current_dir()?),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, path: impl Into<PathBuf>) -> Result<(), CommandError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(CommandError::PathNotFound(path));
        }
        self.cwd = path;
        Ok(())
    }

    pub fn env(&self) -> &EnvOverlay {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut EnvOverlay {
        &mut self.env
    }

    pub fn prompt_format(&self) -> &str {
        &self.prompt_format
    }

    pub fn set_prompt_format(&mut self, format: impl Into<String>) {
        self.prompt_format = format.into();
    }

    pub fn render_prompt(&self) -> String {
        prompt::render(&self.prompt_format, &self.cwd)
    }

    pub fn last_exit_code(&self) -> i32 {
        self.last_exit_code
    }

    pub fn set_last_exit_code(&mut self, code: i32) {
        self.last_exit_code = code;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SessionState::new(dir.path()).is_ok());
        assert!(matches!(
            SessionState::new(dir.path().join("missing")),
            Err(CommandError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_set_cwd_keeps_old_value_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SessionState::new(dir.path()).unwrap();
        assert!(state.set_cwd(dir.path().join("nope")).is_err());
        assert_eq!(state.cwd(), dir.path());
    }

    #[test]
    fn test_default_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::new(dir.path()).unwrap();
        assert_eq!(state.render_prompt(), format!("{}>", dir.path().display()));
    }
}
