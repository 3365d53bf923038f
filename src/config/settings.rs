use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "Dirscout";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("io", "devsam", APP_NAME).map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

fn config_file_path(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.join(CONFIG_FILE)),
        None => get_config_directory()
            .map(|dir| dir.join(CONFIG_FILE))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the application configuration from the config file.
///
/// A missing file is created with defaults. A corrupted or unparsable file
/// logs a warning and falls back to the default configuration instead of
/// failing at startup. `override_dir` redirects the config location for
/// tests; production callers pass `None`.
pub fn load_config(override_dir: Option<&Path>) -> Result<AppConfig> {
    let config_path = config_file_path(override_dir)?;

    if !config_path.exists() {
        tracing::info!("Config file not found, creating default config at {:?}", config_path);
        let default_config = AppConfig::default();
        save_config(&default_config, override_dir)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;
    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(AppConfig::default())
        }
    }
}

/// Saves the provided configuration to the config file.
pub fn save_config(config: &AppConfig, override_dir: Option<&Path>) -> Result<()> {
    let config_path = config_file_path(override_dir)?;

    if let Some(dir) = config_path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            tracing::info!("Created config directory: {:?}", dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::debug!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/io.devsam.Dirscout/
// Linux:   ~/.config/dirscout/
// Windows: %APPDATA%/devsam/Dirscout/config/
