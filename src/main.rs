//! # Enterprise Roster CLI
//!
//! Binary entry point for the `enterprise-roster` command-line tool. It
//! parses arguments with `clap` and dispatches to the command; errors are
//! returned from `main`, which prints them and exits with status 1.
//!
//! The pipeline itself lives in the `enterprise_roster` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
