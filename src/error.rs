use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Process error: {0}")]
    ProcessError(#[from] ProcessError),
    #[error("Command error: {0}")]
    CommandError(#[from] CommandError),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Flag error: {0}")]
    FlagError(String),
    #[error("Logging error: {0}")]
    Logging(String),
}
