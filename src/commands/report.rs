//! # Report Command Implementation
//!
//! This module implements the `report` subcommand, the tool's main job: it
//! enumerates the enterprise's organizations, collects each roster and
//! publishes the reports into the destination repository, then prints a
//! per-organization summary.
//!
//! Every option can also come from the environment variable GitHub Actions
//! sets for the corresponding action input, so the binary runs unchanged as
//! an action step:
//!
//! ```yaml
//! - run: enterprise-roster report
//!   env:
//!     INPUT_TOKEN: ${{ secrets.ENTERPRISE_TOKEN }}
//!     INPUT_ENTERPRISE: acme
//!     INPUT_JSON: "true"
//! ```
//!
//! A failure inside one organization is reported and the run continues; only
//! configuration errors and a failure to list the enterprise make the command
//! exit non-zero.

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Args;
use log::info;
use std::path::PathBuf;

use enterprise_roster::config::{self, FileConfig, Overrides, Settings};
use enterprise_roster::github::GitHubClient;
use enterprise_roster::output::{render_summary, OutputConfig};
use enterprise_roster::phases::orchestrator;

/// Collect every organization's roster and publish the reports
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Token with read access to the enterprise and write access to the
    /// destination repository
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enterprise slug. Defaults to the enterprise of the triggering event.
    #[arg(long, env = "INPUT_ENTERPRISE")]
    pub enterprise: Option<String>,

    /// Destination repository for the reports, as owner/name
    #[arg(long, value_name = "OWNER/NAME", env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Column to sort each report by [default: login]
    #[arg(long, value_name = "COLUMN", env = "INPUT_SORT")]
    pub sort: Option<String>,

    /// Sort order, asc or desc [default: asc]
    #[arg(long, value_name = "ORDER", env = "INPUT_SORT-ORDER")]
    pub sort_order: Option<String>,

    /// Name of the report commit's committer [default: github-actions]
    #[arg(long, value_name = "NAME", env = "INPUT_COMMITTER-NAME")]
    pub committer_name: Option<String>,

    /// Email of the report commit's committer
    /// [default: github-actions@github.com]
    #[arg(long, value_name = "EMAIL", env = "INPUT_COMMITTER-EMAIL")]
    pub committer_email: Option<String>,

    /// Also publish each roster as JSON
    #[arg(long, env = "INPUT_JSON", value_parser = FalseyValueParser::new())]
    pub json: bool,

    /// GitHub API root, e.g. https://HOST/api/v3 for GitHub Enterprise Server
    /// [default: https://api.github.com]
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// YAML file with default settings
    #[arg(short, long, value_name = "FILE", env = "ENTERPRISE_ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Event payload used to find the enterprise when none is given
    #[arg(long, value_name = "FILE", env = "GITHUB_EVENT_PATH", hide = true)]
    pub event_path: Option<PathBuf>,
}

impl ReportArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            token: self.token,
            enterprise: self.enterprise,
            repository: self.repository,
            sort: self.sort,
            sort_order: self.sort_order,
            committer_name: self.committer_name,
            committer_email: self.committer_email,
            json: self.json,
            api_url: self.api_url,
            event_path: self.event_path,
        }
    }
}

/// Execute the `report` command.
pub fn execute(args: ReportArgs, color: &str) -> Result<()> {
    let file = match &args.config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args.overrides(), file)?;

    let client = GitHubClient::new(settings.token.clone(), &settings.api_url)?;
    let store = client.repository(settings.repository.clone());
    info!(
        "Reporting on enterprise {} into {}",
        settings.enterprise, settings.repository
    );

    let summary = orchestrator::run(&client, &store, &settings)
        .with_context(|| format!("Failed to list organizations of {}", settings.enterprise))?;

    print!(
        "{}",
        render_summary(&OutputConfig::from_env_and_flag(color), &summary)
    );
    Ok(())
}
