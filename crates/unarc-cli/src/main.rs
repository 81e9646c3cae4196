//! unarc - extract an archive piped through standard input.

mod cli;
mod commands;
mod error;
mod logging;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.log_level());

    let stdin = std::io::stdin();
    commands::extract::execute(&cli, stdin.lock())
}
