use std::{fs, path::Path};

use super::ConfigError;

/// Reads a startup script into the lines that should be executed.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Missing files yield no lines; unreadable ones are an error.
    pub fn load_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no startup script");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !is_comment(line))
            .map(String::from)
            .collect())
    }
}

fn is_comment(line: &str) -> bool {
    if line.is_empty() || line.starts_with('#') || line.starts_with("::") {
        return true;
    }
    let lower = line.to_ascii_lowercase();
    lower == "rem" || lower.starts_with("rem ")
}
