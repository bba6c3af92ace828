//! # Handler for the `sync` command
//!
//! Generates the aliases of a project from its topology document and reconciles them
//! with the alias file of the group (by default, the project id).

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use crate::{cli::handlers::commons, core::settings::Settings, formats::AliasFormatKind};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Generates aliases for a project and merges them into its alias file."
)]
struct SyncArgs {
    /// JSON document describing the project, its applications and its environments.
    topology: PathBuf,

    /// The alias group to write. Defaults to the project id.
    #[arg(long, short)]
    group: Option<String>,

    /// A former group name whose aliases should be carried over.
    #[arg(long)]
    previous_group: Option<String>,

    /// Overrides the alias file format from the settings.
    #[arg(long, value_enum)]
    format: Option<AliasFormatKind>,
}

pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let sync_args: SyncArgs = commons::parse_args(&args)?;
    let topology = commons::load_topology(&sync_args.topology)?;
    let store = commons::open_store(settings, sync_args.format)?;

    let group = sync_args
        .group
        .unwrap_or_else(|| topology.project.id.clone());
    log::info!(
        "Syncing aliases for project '{}' into group '{}'",
        topology.project.id,
        group
    );

    let created = store
        .create_aliases(
            &topology.project,
            &group,
            &topology.applications,
            &topology.environments,
            sync_args.previous_group.as_deref(),
        )
        .with_context(|| format!("Could not sync aliases for group '{}'", group))?;

    if created {
        let path = store.file_path(&group)?;
        println!(
            "{} Aliases for group '{}' written to {}",
            "✔".green(),
            group.cyan(),
            path.display()
        );
    } else {
        println!(
            "{}",
            format!(
                "Project '{}' has no applications; no aliases were written.",
                topology.project.id
            )
            .yellow()
        );
    }
    Ok(())
}
