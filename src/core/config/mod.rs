//! Startup configuration: command-line flags, file locations and the rc script.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::flags::Flags;
use crate::process::{ProcessRunner, ShellDialect};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub quiet: bool,
    /// `None` when the startup script is disabled.
    pub rc_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
    pub shell_program: Option<OsString>,
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Self {
        let paths = match ConfigPaths::new() {
            Ok(paths) => Some(paths),
            Err(e) => {
                tracing::warn!(error = %e, "running without history or startup script");
                None
            }
        };

        let rc_path = if flags.is_set("norc") {
            None
        } else {
            flags
                .get_value("config")
                .map(PathBuf::from)
                .or_else(|| paths.as_ref().map(|p| p.rc_path.clone()))
        };

        Config {
            quiet: flags.is_set("quiet"),
            rc_path,
            history_path: paths.map(|p| p.history_path),
            shell_program: flags.get_value("shell").map(OsString::from),
        }
    }

    pub fn runner(&self) -> ProcessRunner {
        match &self.shell_program {
            Some(program) => {
                let dialect = ShellDialect::for_program(Path::new(program));
                ProcessRunner::with_program(program.clone(), dialect)
            }
            None => ProcessRunner::default(),
        }
    }

    pub fn startup_lines(&self) -> Result<Vec<String>, ConfigError> {
        match &self.rc_path {
            Some(path) => ConfigLoader::load_lines(path),
            None => Ok(Vec::new()),
        }
    }
}
