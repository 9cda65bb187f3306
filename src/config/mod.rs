//! Configuration module for gh-user-search
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "GH_USER_SEARCH_SETTINGS_PATH";

/// Load settings from an explicit path, the environment, a default location, or defaults
///
/// Environment overrides are merged last and the result is validated.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate_settings_file(explicit)? {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?
        }
        None => {
            debug!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

/// Find the settings file to use, if any
fn locate_settings_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    // An explicit path must exist
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("gh-user-search/settings.yml"));
    }

    Ok(candidates.into_iter().find(|p| p.exists()))
}
