//! Default values for enterprise-roster settings.
//!
//! These apply when neither a flag, its environment variable, nor the YAML
//! config file provides a value.

use crate::github::Committer;

/// GitHub REST API root used when `GITHUB_API_URL` is not set.
pub const API_URL: &str = "https://api.github.com";

/// Committer identity for report commits.
pub const COMMITTER_NAME: &str = "github-actions";
pub const COMMITTER_EMAIL: &str = "github-actions@github.com";

/// Directory in the destination repository that receives the reports.
pub const REPORTS_DIR: &str = "reports";

/// Items requested per page from every listing.
pub const PAGE_SIZE: u32 = 100;

/// Returns the default committer.
pub fn committer() -> Committer {
    Committer {
        name: COMMITTER_NAME.to_string(),
        email: COMMITTER_EMAIL.to_string(),
    }
}
