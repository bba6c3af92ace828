//! # Handler for the `list` command
//!
//! Prints the aliases of a group, sorted and aligned, flagging the ones sitealias manages.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::console::measure_text_width;

use crate::{
    cli::handlers::commons,
    core::settings::Settings,
    formats::AliasFormatKind,
    models::{AliasMap, AliasRecord},
};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "Lists the aliases of a group.")]
struct ListArgs {
    /// The alias group to show.
    group: String,

    /// Overrides the alias file format from the settings.
    #[arg(long, value_enum)]
    format: Option<AliasFormatKind>,
}

pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let list_args: ListArgs = commons::parse_args(&args)?;
    let store = commons::open_store(settings, list_args.format)?;

    let aliases = store
        .list_aliases(&list_args.group)
        .with_context(|| format!("Could not read aliases for group '{}'", list_args.group))?;

    if aliases.is_empty() {
        println!(
            "\nNo aliases found for group '{}' in {}.",
            list_args.group,
            store.dir().display()
        );
        return Ok(());
    }

    println!("\nAliases for group '{}':", list_args.group.cyan());
    for line in render_rows(&list_args.group, &aliases) {
        println!("{}", line);
    }
    Ok(())
}

/// One aligned line per alias: `@group.name  -> target  [managed]`.
fn render_rows(group: &str, aliases: &AliasMap) -> Vec<String> {
    let max_len = aliases
        .keys()
        .map(|name| measure_text_width(&format!("@{group}.{name}")))
        .max()
        .unwrap_or(0);

    aliases
        .iter()
        .map(|(name, alias)| {
            let display_raw = format!("@{group}.{name}");
            let padding = " ".repeat(max_len.saturating_sub(measure_text_width(&display_raw)));
            let marker = if alias.managed {
                "managed".green().to_string()
            } else {
                "user".yellow().to_string()
            };
            format!(
                "  {}{} ->  {}  [{}]",
                display_raw.cyan(),
                padding,
                describe_target(alias),
                marker
            )
        })
        .collect()
}

/// `user@host:root` for remote aliases, the root alone for local ones.
fn describe_target(alias: &AliasRecord) -> String {
    let root = alias.root.as_deref().unwrap_or("");
    match (&alias.user, &alias.host) {
        (Some(user), Some(host)) => format!("{user}@{host}:{root}"),
        (None, Some(host)) => format!("{host}:{root}"),
        _ if root.is_empty() => "(no root)".dimmed().to_string(),
        _ => root.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_target() {
        assert_eq!(
            describe_target(&AliasRecord::remote("http://m", "h.example", "u", "/app/web")),
            "u@h.example:/app/web"
        );
        assert_eq!(describe_target(&AliasRecord::local("/src/_www")), "/src/_www");
    }

    #[test]
    fn test_render_rows_are_aligned() {
        colored::control::set_override(false);
        let aliases: AliasMap = [
            ("_local".to_string(), AliasRecord::local("/src/_www")),
            (
                "staging".to_string(),
                AliasRecord {
                    managed: false,
                    ..AliasRecord::remote("http://s", "h", "u", "/app/")
                },
            ),
        ]
        .into_iter()
        .collect();

        let rows = render_rows("abc", &aliases);
        assert_eq!(rows[0], "  @abc._local  ->  /src/_www  [managed]");
        assert_eq!(rows[1], "  @abc.staging ->  u@h:/app/  [user]");
    }
}
