//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! By default settings live in `settings.json` in the user's configuration
//! directory, e.g. `~/.config/checkers/settings.json`. Falls back to the
//! working directory if no configuration directory can be determined.
//!
//! # Error Handling
//!
//! - A missing file yields default settings
//! - An unreadable, malformed or out-of-range file is an error for the caller

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use super::error::CoreResult;
use super::resources::GameSettings;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Default settings path in the user's configuration directory
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "checkers", "checkers") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`
pub fn load_settings(path: &Path) -> CoreResult<GameSettings> {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return Ok(GameSettings::default());
    }

    let contents = fs::read_to_string(path)?;
    let settings: GameSettings = serde_json::from_str(&contents).map_err(|e| {
        warn!("[SETTINGS] Failed to parse settings file at {:?}: {}", path, e);
        e
    })?;
    settings.validate()?;
    info!("[SETTINGS] Loaded settings from {:?}", path);
    Ok(settings)
}

/// Save settings to `path`, creating parent directories as needed
pub fn save_settings(settings: &GameSettings, path: &Path) -> CoreResult<()> {
    settings.validate()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
