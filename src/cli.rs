//! CLI argument parsing, logging setup and command dispatch

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::Level;

use crate::commands;

/// Enterprise Roster - Publish member and collaborator reports for every
/// organization in a GitHub enterprise
#[derive(Parser, Debug)]
#[command(name = "enterprise-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect every organization's roster and publish the reports
    Report(commands::report::ReportArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Report(args) => commands::report::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Whether the process runs as a GitHub Actions step.
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Installs the global logger.
///
/// Inside GitHub Actions, warnings and errors become `::warning::` and
/// `::error::` workflow commands so they surface as run annotations.
fn init_logging(level: &str) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level));
    if in_github_actions() {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(buf, "::error::{}", record.args()),
            Level::Warn => writeln!(buf, "::warning::{}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        });
    } else {
        builder.format_timestamp(None).format_target(false);
    }
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}
