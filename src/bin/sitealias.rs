// src/bin/sitealias.rs

use clap::Parser;
use colored::*;
use sitealias::cli::{Cli, dispatcher};

/// The main entry point of the `sitealias` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // `{:#}` renders the whole context chain, e.g. "Could not sync ...: Alias directory not writable: ...".
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
