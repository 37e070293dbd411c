use crate::error::{Result, TaskdeckError};
use std::path::PathBuf;

pub const TASKDECK_DIR: &str = ".taskdeck";
pub const CONFIG_FILE: &str = "config.yaml";

/// Directory holding local preferences: `$TASKDECK_HOME` when set,
/// otherwise `~/.taskdeck`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TASKDECK_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = home::home_dir().ok_or(TaskdeckError::HomeNotFound)?;
    Ok(home.join(TASKDECK_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}
