//! Phase 6: Publishing
//!
//! Writes the sorted roster into the destination repository as
//! `reports/<org>.csv`, plus `reports/<org>.json` when JSON export is on.
//!
//! Each write is a create-or-update: the current blob SHA of the path is
//! probed first and, when the file exists, carried in the write so GitHub
//! updates it in place. A missing file is the normal first-run case, not an
//! error.

use chrono::{NaiveDate, Utc};
use log::{debug, info};

use crate::config::Settings;
use crate::defaults;
use crate::error::Result;
use crate::github::{FileWrite, ReportStore};
use crate::report;
use crate::roster::{format_date, Roster};

/// A report file written to the destination repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFile {
    pub path: String,
    /// Blob SHA of the written content.
    pub sha: String,
    /// Whether the write replaced an existing file.
    pub updated: bool,
}

/// Commit message for reports written on `date`.
pub fn commit_message(date: NaiveDate) -> String {
    format!("{} User totals report", format_date(date))
}

/// Path of an organization's report with the given extension.
pub fn report_path(org: &str, extension: &str) -> String {
    format!("{}/{}.{}", defaults::REPORTS_DIR, org, extension)
}

/// Execute Phase 6: publish the roster's reports
///
/// An empty roster publishes nothing.
pub fn execute(
    store: &dyn ReportStore,
    roster: &Roster,
    settings: &Settings,
) -> Result<Vec<PublishedFile>> {
    publish_on(store, roster, settings, Utc::now().date_naive())
}

fn publish_on(
    store: &dyn ReportStore,
    roster: &Roster,
    settings: &Settings,
    date: NaiveDate,
) -> Result<Vec<PublishedFile>> {
    if roster.is_empty() {
        debug!("{}: empty roster, nothing to publish", roster.organization());
        return Ok(Vec::new());
    }

    let message = commit_message(date);
    let mut published = Vec::new();

    let csv = report::to_csv(roster)?;
    published.push(put(store, roster, settings, "csv", csv, &message)?);

    if settings.json {
        let json = report::to_json(roster)?;
        published.push(put(store, roster, settings, "json", json, &message)?);
    }

    Ok(published)
}

fn put(
    store: &dyn ReportStore,
    roster: &Roster,
    settings: &Settings,
    extension: &str,
    content: Vec<u8>,
    message: &str,
) -> Result<PublishedFile> {
    let path = report_path(roster.organization(), extension);
    let sha = store.file_sha(&path)?;
    let updated = sha.is_some();

    info!(
        "Pushing {} report to {}/{}",
        roster.organization(),
        store.describe(),
        path
    );
    let new_sha = store.write_file(&FileWrite {
        path: path.clone(),
        message: message.to_string(),
        content,
        committer: settings.committer.clone(),
        sha,
    })?;

    Ok(PublishedFile {
        path,
        sha: new_sha,
        updated,
    })
}
