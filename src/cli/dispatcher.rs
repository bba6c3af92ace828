use anyhow::{Result, anyhow};

use crate::{cli::handlers, core::settings::Settings};

/// Defines a command, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &Settings) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "sync",
        aliases: &[],
        handler: handlers::sync::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "delete",
        aliases: &["del"],
        handler: handlers::delete::handle,
    },
    CommandDefinition {
        name: "key",
        aliases: &[],
        handler: handlers::key::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `all_args` (`<command> [args...]`) to the matching handler.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(command_name) = args.next() else {
        println!("Nothing to do. Run 'sitealias --help' to see the available commands.");
        return Ok(());
    };

    let command = find_command(&command_name).ok_or_else(|| {
        anyhow!(
            "Unknown command '{}'. Available commands: {}.",
            command_name,
            COMMAND_REGISTRY
                .iter()
                .map(|cmd| cmd.name)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let settings = Settings::load()?;
    log::debug!("Loaded settings: {:?}", settings);

    (command.handler)(args.collect(), &settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("sync").map(|c| c.name), Some("sync"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("list"));
        assert_eq!(find_command("del").map(|c| c.name), Some("delete"));
        assert!(find_command("rename").is_none());
    }

    #[test]
    fn test_unknown_command_lists_available_ones() {
        let err = dispatch(vec!["frobnicate".to_string()]).unwrap_err();
        assert!(err.to_string().contains("sync, list, delete, key"));
    }

    #[test]
    fn test_no_command_is_ok() {
        assert!(dispatch(Vec::new()).is_ok());
    }
}
