use super::ConfigError;
use std::path::{Path, PathBuf};

const RC_FILE: &str = ".pseudocmdrc";
const HISTORY_FILE: &str = ".pseudocmd_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::with_home(&home))
    }

    pub fn with_home(home: &Path) -> Self {
        ConfigPaths {
            rc_path: home.join(RC_FILE),
            history_path: home.join(HISTORY_FILE),
        }
    }
}
