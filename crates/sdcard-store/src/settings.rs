//! User settings, stored as TOML in the platform config directory.
//!
//! - Linux: ~/.config/sdcard/settings.toml
//! - macOS: ~/Library/Application Support/org.sdcard.sdcard/settings.toml
//! - Windows: %APPDATA%\sdcard\sdcard\config\settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sdcard_session::Distribution;

use crate::error::{Result, StoreError};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "sdcard";
const APP_NAME: &str = "sdcard";
const CONFIG_FILENAME: &str = "settings.toml";
const LIBRARY_FILENAME: &str = "library.json";
const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Library file. Defaults to the platform data directory.
    pub library_path: Option<PathBuf>,
    /// Session file. Defaults to the platform data directory.
    pub session_path: Option<PathBuf>,
    /// How `session start` fills stacks unless told otherwise.
    pub distribution: Distribution,
    /// Tag name applied to sequences advanced past during a session.
    pub auto_tag: Option<String>,
}

impl Settings {
    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(|| data_file(LIBRARY_FILENAME))
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| data_file(SESSION_FILENAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// A file in the platform data directory, or in the working directory when
/// there is none.
fn data_file(name: &str) -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(name),
        None => PathBuf::from(name),
    }
}

/// Path of the settings file, if the platform has a config directory.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads settings from the platform location, falling back to defaults.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        warn!("could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Loads settings from `path`. A missing or unreadable file gives defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

/// Saves settings to the platform location.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let path = settings_path().ok_or(StoreError::NoSettingsDirectory)?;
    save_settings_to(settings, &path)?;
    Ok(path)
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(|e| StoreError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), "saved settings");
    Ok(())
}
