//! Child-shell execution: quoting, script composition, spawning and streaming.

use std::io::{self, Write};

pub mod dialect;
pub mod executor;
pub mod pump;
pub mod quote;
pub mod script;
pub mod signal;
pub mod wait;

pub use dialect::ShellDialect;
pub use executor::ProcessRunner;
pub use script::ScriptComposer;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("child {0} was not captured")]
    MissingPipe(&'static str),
    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),
    #[error("signal error: {0}")]
    Signal(String),
}

/// Output and error sinks a command writes to.
pub struct Streams<'a> {
    pub out: &'a mut (dyn Write + Send),
    pub err: &'a mut (dyn Write + Send),
}

impl<'a> Streams<'a> {
    pub fn new(out: &'a mut (dyn Write + Send), err: &'a mut (dyn Write + Send)) -> Self {
        Self { out, err }
    }
}
