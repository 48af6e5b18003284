//! Settings file and per-invocation context.
//!
//! `Context` is the explicit object passed into every dispatch call; there is
//! no global mutable state beyond the ui flags. Settings live in an optional
//! `config.json` under the XDG config directory; an absent file means
//! defaults.

use crate::cli::args::GlobalFlags;
use crate::error::Result;
use crate::project_identity;
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Helper client for the community repository.
    pub aur_helper: String,
    /// Pass non-interactive flags to every mutating backend call.
    pub noconfirm: bool,
    /// Release channel this installation follows.
    pub channel: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aur_helper: project_identity::DEFAULT_AUR_HELPER.to_string(),
            noconfirm: true,
            channel: project_identity::DEFAULT_CHANNEL.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = paths::config_file()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = paths::config_file()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Everything a dispatch call needs to know about its environment.
#[derive(Debug, Clone)]
pub struct Context {
    pub quiet: bool,
    pub json: bool,
    pub noconfirm: bool,
    pub aur_helper: String,
    pub channel: String,
    pub journal_path: PathBuf,
}

impl Context {
    pub fn build(flags: &GlobalFlags, settings: &Settings) -> Result<Self> {
        Ok(Self {
            quiet: flags.quiet,
            json: flags.json,
            noconfirm: settings.noconfirm,
            aur_helper: settings.aur_helper.clone(),
            channel: settings.channel.clone(),
            journal_path: paths::journal_file()?,
        })
    }
}
