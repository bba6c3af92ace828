use clap::Parser;

pub mod dispatcher;
pub mod handlers;

const HELP_TEMPLATE: &str = "\
<title>sitealias</title> {version}
Keeps site aliases in sync with a hosted platform project.

<title>USAGE:</title>
    <cmd>sitealias</cmd> <hl><command></hl> [args...]

<title>COMMANDS:</title>
    <cmd>sync</cmd> <hl><topology.json></hl>   Generate aliases and merge them into the group's alias file
    <cmd>list</cmd> <hl><group></hl>           Show the aliases of a group <dim>(alias: ls)</dim>
    <cmd>delete</cmd> <hl><group></hl>         Remove the alias file of a group <err>(destructive)</err> <dim>(alias: del)</dim>
    <cmd>key</cmd>                    Print the ownership key of this build

Run <cmd>sitealias <command> --help</cmd> for the options of a command.
Settings are read from <hl>~/.config/sitealias/config.toml</hl> or <hl>$SITEALIAS_CONFIG</hl>.
";

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let err = if use_colors { "\x1b[91m" } else { "" }; // Bright Red
    let dim = if use_colors { "\x1b[2m" } else { "" }; // Dim
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = HELP_TEMPLATE
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<err>", err)
        .replace("</err>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// sitealias: generates and reconciles site aliases for platform projects.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The command followed by its arguments. Each command parses its own arguments.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
