//! Command-line interface module.

mod args;
mod batch;
pub mod frame;
pub mod translate;

pub use args::Cli;

use anyhow::Result;

/// Dispatch the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.command.mode() {
        Some(mode) => translate::run(cli.command.args(), mode),
        None => frame::run(cli.command.args()),
    }
}
