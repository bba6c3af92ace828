// src/cli/handlers/commons.rs

// Shared helpers used by several handlers.

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use std::{fs, path::Path};

use crate::{
    core::{alias_store::AliasStore, settings::Settings},
    formats::AliasFormatKind,
    models::Topology,
};

/// Parses handler arguments. `--help` and `--version` print and exit like a top-level
/// clap command would instead of surfacing as errors.
pub fn parse_args<T: Parser>(args: &[String]) -> Result<T> {
    T::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => anyhow::Error::from(e),
    })
}

/// Reads the project topology document handed over by the platform API client.
pub fn load_topology(path: &Path) -> Result<Topology> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse topology file '{}'", path.display()))
}

/// Builds the alias store from the settings, honoring a `--format` override.
pub fn open_store(settings: &Settings, format: Option<AliasFormatKind>) -> Result<AliasStore> {
    let store = settings
        .alias_store(format)
        .context("Could not determine the alias directory")?;
    log::debug!("Using alias directory '{}'", store.dir().display());
    Ok(store)
}
