//! Phase 1: Organization Enumeration
//!
//! Lists every organization of the enterprise, in the order the API returns
//! them. This is the only phase whose failure is fatal: without the list
//! there is nothing to iterate, so an unknown or inaccessible enterprise
//! aborts the run.

use log::{debug, info};

use crate::error::Result;
use crate::github::RosterSource;
use crate::pagination::Paginator;

/// Execute Phase 1: collect the enterprise's organization logins
pub fn execute(source: &dyn RosterSource, enterprise: &str) -> Result<Vec<String>> {
    let mut pages =
        Paginator::new(|cursor: Option<&str>| source.enterprise_organizations(enterprise, cursor));
    let organizations = pages.by_ref().collect::<Result<Vec<String>>>()?;

    debug!(
        "Enterprise {} listed in {} page(s)",
        enterprise,
        pages.pages_fetched()
    );
    info!(
        "Found {} organization(s) in enterprise {}",
        organizations.len(),
        enterprise
    );
    Ok(organizations)
}
