mod expander;

pub use expander::PathExpander;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Home directory not found")]
    HomeDirNotFound,
}
