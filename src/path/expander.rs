use std::path::{Component, Path, PathBuf};

use super::PathError;

/// Turns `cd`-style arguments into absolute, lexically normalised paths.
#[derive(Clone, Debug)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Expands a leading `~` or `~/` to the home directory.
    pub fn expand(&self, path: &str) -> Result<PathBuf, PathError> {
        if path == "~" {
            return self.home_dir();
        }
        match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
            Some(rest) => Ok(self.home_dir()?.join(rest)),
            // "~user" is left alone
            None => Ok(PathBuf::from(path)),
        }
    }

    /// Resolves `arg` against `base` and drops `.`/`..` without touching the filesystem.
    pub fn resolve(&self, base: &Path, arg: &str) -> Result<PathBuf, PathError> {
        let expanded = self.expand(arg)?;
        Ok(normalize(&base.join(expanded)))
    }

    pub fn home_dir(&self) -> Result<PathBuf, PathError> {
        self.home.clone().ok_or(PathError::HomeDirNotFound)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
