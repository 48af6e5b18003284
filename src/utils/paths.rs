use crate::error::{Result, WareError};
use crate::project_identity;
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "skywareos", project_identity::STABLE_PROJECT_ID)
        .ok_or_else(|| WareError::Other("Could not determine user directories".to_string()))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn state_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    // state_dir is Linux-only in the directories crate; fall back to data.
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_dir())
        .to_path_buf())
}

/// The append-only dispatch journal.
pub fn journal_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("journal.log"))
}
