use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::itunes::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Optional per-user overrides. Every field falls back to its default when
/// absent from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Where pages are written; `~/Desktop` when unset
    pub output_dir: Option<PathBuf>,
    pub open_in_viewer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            output_dir: None,
            open_in_viewer: true,
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "ipic", "ipic").context("Could not determine project directories")
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

/// Load settings from the user's config directory, or defaults if there is
/// no settings file.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).context("Failed to read settings file")?;
    serde_json::from_str(&content).context("Failed to parse settings file")
}
