//! # Run Summary Output
//!
//! Renders the [`RunSummary`] printed at the end of `report`, with colors and
//! emoji only when the terminal and the user allow them.
//!
//! Color is decided by `--color=always|never|auto`. In auto mode the usual
//! conventions apply: `NO_COLOR` (any value) and `CLICOLOR=0` disable color,
//! `CLICOLOR_FORCE=1` forces it, `TERM=dumb` disables it, and otherwise the
//! console's own TTY detection decides.

use std::env;
use std::fmt::Write;

use console::style;

use crate::phases::orchestrator::{OrgOutcome, OrgReport, RunSummary};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, else the plain alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn organization_line(config: &OutputConfig, report: &OrgReport) -> String {
    let (marker, detail) = match &report.outcome {
        OrgOutcome::Published(files) => {
            let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
            (
                emoji(config, "✅", "[OK]"),
                format!("{} record(s) -> {}", report.records, paths.join(", ")),
            )
        }
        OrgOutcome::Skipped => (emoji(config, "⏭️ ", "[SKIP]"), "nothing to publish".to_string()),
        OrgOutcome::Failed(error) => (emoji(config, "❌", "[FAIL]"), error.to_string()),
    };

    let name = if config.use_color {
        style(&report.organization).bold().to_string()
    } else {
        report.organization.clone()
    };
    let mut line = format!("{} {}: {}", marker, name, detail);
    if !report.warnings.is_empty() {
        let note = format!(" ({} warning(s))", report.warnings.len());
        if config.use_color {
            line.push_str(&style(note).yellow().to_string());
        } else {
            line.push_str(&note);
        }
    }
    line
}

/// Renders the end-of-run summary, one line per organization and a totals
/// line.
pub fn render_summary(config: &OutputConfig, summary: &RunSummary) -> String {
    let mut out = String::new();
    for report in &summary.organizations {
        let _ = writeln!(out, "{}", organization_line(config, report));
    }
    let _ = writeln!(
        out,
        "\n{} Enterprise {}: {} published, {} skipped, {} failed",
        emoji(config, "📊", "[SUMMARY]"),
        summary.enterprise,
        summary.published(),
        summary.skipped(),
        summary.failed()
    );
    out
}
