//! smil-translate - Replace SMIL animations with CSS or Web Animations.

mod cli;
mod config;
mod dom;
mod logger;
mod smil;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::{SmilConfig, init_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    init_config(SmilConfig::load(cli.config.as_deref())?);

    cli::run(&cli)
}
