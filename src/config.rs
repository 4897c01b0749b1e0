//! # Run Configuration
//!
//! Settings reach a run through three layers, highest precedence first:
//!
//! 1.  **Flags and environment**: `--token`/`INPUT_TOKEN` and friends, parsed
//!     by the CLI into [`Overrides`]. Blank values count as unset, since
//!     GitHub Actions exports every declared input even when it is empty.
//! 2.  **Config file**: an optional YAML file with the same keys
//!     ([`FileConfig`]).
//! 3.  **Built-in defaults** from [`crate::defaults`].
//!
//! When no layer names the enterprise, it is read from the triggering event
//! payload (`enterprise.slug` in the file at `GITHUB_EVENT_PATH`).
//!
//! ## Example
//!
//! ```yaml
//! enterprise: acme
//! repository: acme/roster-reports
//! sort: updatedAt
//! sort-order: desc
//! json: true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};
use crate::github::{Committer, RepoRef};
use crate::phases::aggregate::{SortColumn, SortOrder};

/// Settings that may come from the YAML config file.
///
/// The token is deliberately absent; it only comes from flags or the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub enterprise: Option<String>,
    pub repository: Option<String>,
    pub sort: Option<String>,
    pub sort_order: Option<String>,
    pub committer_name: Option<String>,
    pub committer_email: Option<String>,
    pub json: Option<bool>,
    pub api_url: Option<String>,
}

/// Parses a YAML config document.
pub fn parse(yaml_content: &str) -> Result<FileConfig> {
    // An empty document is an empty config, not an error.
    if yaml_content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Parses a config file from a path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|err| Error::Config {
        message: format!("Cannot read config file {}: {}", path.display(), err),
        hint: None,
    })?;
    parse(&content)
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub enterprise: Option<String>,
    pub repository: Option<String>,
    pub sort: Option<String>,
    pub sort_order: Option<String>,
    pub committer_name: Option<String>,
    pub committer_email: Option<String>,
    pub json: bool,
    pub api_url: Option<String>,
    /// Path of the GitHub Actions event payload.
    pub event_path: Option<PathBuf>,
}

#[derive(Deserialize)]
struct EventPayload {
    enterprise: Option<EventEnterprise>,
}

#[derive(Deserialize)]
struct EventEnterprise {
    slug: Option<String>,
}

/// Reads `enterprise.slug` from a GitHub Actions event payload.
///
/// Payloads without an enterprise (most repository events) yield `None`.
pub fn enterprise_from_event<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    let payload: EventPayload = serde_json::from_str(&content)?;
    Ok(payload
        .enterprise
        .and_then(|enterprise| enterprise.slug)
        .and_then(non_blank))
}

/// The resolved and validated configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub enterprise: String,
    pub repository: RepoRef,
    pub sort: SortColumn,
    pub sort_order: SortOrder,
    pub committer: Committer,
    pub json: bool,
    pub api_url: String,
}

impl Settings {
    /// Layers `overrides` over `file` over the defaults and validates the
    /// result.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let token = pick(overrides.token, None).ok_or_else(|| Error::Config {
            message: "No token provided".to_string(),
            hint: Some("Pass --token or set INPUT_TOKEN".to_string()),
        })?;

        let enterprise = match pick(overrides.enterprise, file.enterprise) {
            Some(enterprise) => Some(enterprise),
            None => match &overrides.event_path {
                Some(path) => enterprise_from_event(path)?,
                None => None,
            },
        }
        .ok_or_else(|| Error::Config {
            message: "No enterprise provided".to_string(),
            hint: Some(
                "Pass --enterprise, set INPUT_ENTERPRISE, or run on an enterprise event"
                    .to_string(),
            ),
        })?;

        let repository = pick(overrides.repository, file.repository)
            .ok_or_else(|| Error::Config {
                message: "No destination repository provided".to_string(),
                hint: Some("Pass --repository or set GITHUB_REPOSITORY".to_string()),
            })?
            .parse()?;

        let sort = match pick(overrides.sort, file.sort) {
            Some(column) => column.parse()?,
            None => SortColumn::default(),
        };
        let sort_order = match pick(overrides.sort_order, file.sort_order) {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        let mut committer = defaults::committer();
        if let Some(name) = pick(overrides.committer_name, file.committer_name) {
            committer.name = name;
        }
        if let Some(email) = pick(overrides.committer_email, file.committer_email) {
            committer.email = email;
        }

        Ok(Self {
            token,
            enterprise,
            repository,
            sort,
            sort_order,
            committer,
            json: overrides.json || file.json.unwrap_or(false),
            api_url: pick(overrides.api_url, file.api_url)
                .unwrap_or_else(|| defaults::API_URL.to_string()),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// First non-blank value of the two layers.
fn pick(flag: Option<String>, file: Option<String>) -> Option<String> {
    flag.and_then(non_blank).or_else(|| file.and_then(non_blank))
}
