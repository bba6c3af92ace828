use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::{cli::handlers::commons, core::settings::Settings, formats::AliasFormatKind};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Deletes the alias file of a group, including aliases added by hand."
)]
struct DeleteArgs {
    /// The alias group to delete.
    group: String,

    /// Overrides the alias file format from the settings.
    #[arg(long, value_enum)]
    format: Option<AliasFormatKind>,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let delete_args: DeleteArgs = commons::parse_args(&args)?;
    let store = commons::open_store(settings, delete_args.format)?;
    let path = store.file_path(&delete_args.group)?;

    if !path.exists() {
        println!(
            "No alias file for group '{}' at {}; nothing to delete.",
            delete_args.group,
            path.display()
        );
        return Ok(());
    }

    if !delete_args.yes {
        println!(
            "\n{}",
            format!(
                "This removes {} along with any aliases you added to it.",
                path.display()
            )
            .red()
            .bold()
        );
        if !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("\nOperation cancelled.");
            return Ok(());
        }
    }

    store
        .delete_aliases(&delete_args.group)
        .with_context(|| format!("Could not delete aliases for group '{}'", delete_args.group))?;

    println!(
        "{} Deleted aliases for group '{}'.",
        "✔".green(),
        delete_args.group.cyan()
    );
    Ok(())
}
