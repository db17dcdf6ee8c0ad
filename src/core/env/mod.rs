mod overlay;
mod snapshot;

pub use overlay::EnvOverlay;
pub use snapshot::{merged, EnvSnapshot};

/// Case-insensitive comparison key for a variable name.
pub(crate) fn fold_key(name: &str) -> String {
    name.to_uppercase()
}
