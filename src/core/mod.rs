pub mod commands;
pub mod config;
pub mod env;
pub mod prompt;
pub mod state;

pub use state::SessionState;
