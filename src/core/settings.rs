//! # Settings
//!
//! Branding and placement configuration, read from `config.toml` in the sitealias config
//! directory (or the file named by `$SITEALIAS_CONFIG`). A default file is written the
//! first time the settings are loaded.
//!
//! ```toml
//! [application]
//! name = "Platform.sh CLI"
//!
//! [local]
//! web_root = "_www"
//!
//! [aliases]
//! format = "yaml"
//! dir = "~/.drush/sites"
//! ```

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    core::{
        alias_store::AliasStore,
        generator::AliasGenerator,
        ownership::OwnershipKey,
        paths::{self, PathError},
    },
    formats::AliasFormatKind,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Failed to parse settings file '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Product branding.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApplicationSettings {
    /// Product name; the ownership key is derived from it.
    pub name: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: "Platform.sh CLI".to_string(),
        }
    }
}

/// Local checkout layout.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LocalSettings {
    /// Web root of a local build, relative to the application's source directory.
    pub web_root: String,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            web_root: "_www".to_string(),
        }
    }
}

/// Where and how alias files are written.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AliasSettings {
    pub format: AliasFormatKind,
    /// Alias directory. `~` and environment variables are expanded.
    pub dir: String,
}

impl Default for AliasSettings {
    fn default() -> Self {
        Self {
            format: AliasFormatKind::Yaml,
            dir: "~/.drush/sites".to_string(),
        }
    }
}

/// The deserialized structure of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub local: LocalSettings,
    pub aliases: AliasSettings,
}

impl Settings {
    /// Loads the settings from their default location, creating the file with
    /// default values if it does not exist yet.
    pub fn load() -> Result<Self, SettingsError> {
        let path = paths::get_settings_path()?;
        Self::load_or_init(&path)
    }

    /// Loads the settings from `path`, writing the defaults there first if the file is missing.
    pub fn load_or_init(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("Settings file not found. Writing defaults to '{}'.", path.display());
            let defaults = Self::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, toml::to_string_pretty(&defaults)?)?;
            return Ok(defaults);
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| SettingsError::TomlParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The ownership key for this build's branding.
    pub fn ownership_key(&self) -> OwnershipKey {
        OwnershipKey::from_product_name(&self.application.name)
    }

    /// The alias directory with `~` and variables expanded.
    pub fn alias_dir(&self) -> Result<PathBuf, PathError> {
        paths::expand_path_template(&self.aliases.dir)
    }

    /// Builds the alias store described by these settings. `format` overrides the
    /// configured format when given.
    pub fn alias_store(
        &self,
        format: Option<AliasFormatKind>,
    ) -> Result<AliasStore, SettingsError> {
        let format = format.unwrap_or(self.aliases.format);
        Ok(AliasStore::new(
            self.alias_dir()?,
            format.backend(),
            self.ownership_key(),
            AliasGenerator::new(self.local.web_root.clone()),
        ))
    }
}
