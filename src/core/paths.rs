// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, SETTINGS_FILENAME, SETTINGS_PATH_ENV};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref SITEALIAS_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path template '{template}': {message}")]
    Expansion { template: String, message: String },
}

/// Returns the path to the sitealias configuration directory (`~/.config/sitealias`).
/// Creates it if it doesn't exist.
///
/// Memoized: the first call computes and caches the path.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    // A poisoned lock only means another thread panicked mid-lookup; the cached value is still usable.
    let mut cached_path_guard = SITEALIAS_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the settings file path: `$SITEALIAS_CONFIG` when set, otherwise
/// `config.toml` inside the config directory.
pub fn get_settings_path() -> Result<PathBuf, PathError> {
    match std::env::var_os(SETTINGS_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => get_config_dir().map(|dir| dir.join(SETTINGS_FILENAME)),
    }
}

/// Expands a path template, resolving the home directory (`~`) and environment
/// variables (`$VAR` / `${VAR}`).
pub fn expand_path_template(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
