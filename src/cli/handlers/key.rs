use anyhow::Result;
use clap::Parser;

use crate::{cli::handlers::commons, core::settings::Settings};

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    about = "Prints the key that marks aliases as managed by this build."
)]
struct KeyArgs {}

pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let _: KeyArgs = commons::parse_args(&args)?;
    println!("{}", settings.ownership_key());
    Ok(())
}
