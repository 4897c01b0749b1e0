//! Orchestrator for a complete report run
//!
//! Enumerates the enterprise once and then takes each organization, one at a
//! time, through phases 2 to 6. Only enumeration can fail the run; anything
//! that goes wrong inside an organization is logged as a warning tagged with
//! its login and recorded in that organization's [`OrgReport`].

use log::{info, warn};

use super::{phase1, phase2, phase3, phase4, phase5, phase6, Collection};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::github::{ReportStore, RosterSource};
use crate::phases::publish::PublishedFile;
use crate::roster::Roster;

/// Final state of one organization.
#[derive(Debug)]
pub enum OrgOutcome {
    /// Reports were written.
    Published(Vec<PublishedFile>),
    /// Nothing was collected, so nothing was written.
    Skipped,
    /// Writing the reports failed.
    Failed(Error),
}

/// What happened to one organization during the run.
#[derive(Debug)]
pub struct OrgReport {
    pub organization: String,
    /// Records in the roster handed to the publisher.
    pub records: usize,
    pub outcome: OrgOutcome,
    /// Organization-scoped collection failures, in the order they occurred.
    pub warnings: Vec<Error>,
}

impl OrgReport {
    pub fn is_published(&self) -> bool {
        matches!(self.outcome, OrgOutcome::Published(_))
    }
}

/// Per-organization results of a run, in enumeration order.
#[derive(Debug)]
pub struct RunSummary {
    pub enterprise: String,
    pub organizations: Vec<OrgReport>,
}

impl RunSummary {
    pub fn published(&self) -> usize {
        self.count(|outcome| matches!(outcome, OrgOutcome::Published(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, OrgOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, OrgOutcome::Failed(_)))
    }

    /// Organizations that finished with at least one warning.
    pub fn with_warnings(&self) -> usize {
        self.organizations
            .iter()
            .filter(|report| !report.warnings.is_empty())
            .count()
    }

    fn count(&self, predicate: impl Fn(&OrgOutcome) -> bool) -> usize {
        self.organizations
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Execute a complete run (Phases 1-6)
///
/// Returns `Err` only when the enterprise cannot be enumerated.
pub fn run(
    source: &dyn RosterSource,
    store: &dyn ReportStore,
    settings: &Settings,
) -> Result<RunSummary> {
    // Phase 1: Organization Enumeration
    let organizations = phase1::execute(source, &settings.enterprise)?;

    let reports = organizations
        .iter()
        .map(|org| process_organization(source, store, settings, org))
        .collect();

    Ok(RunSummary {
        enterprise: settings.enterprise.clone(),
        organizations: reports,
    })
}

fn process_organization(
    source: &dyn RosterSource,
    store: &dyn ReportStore,
    settings: &Settings,
    org: &str,
) -> OrgReport {
    info!("Collecting {}", org);
    let mut warnings = Vec::new();

    // Phase 2: Membership Collection. A failure here ends collection.
    let mut roster = match phase2::execute(source, org) {
        Collection::Complete(roster) => {
            // Phase 3: SSO Identity Resolution
            let roster = settle(phase3::execute(source, roster), &mut warnings);
            // Phase 4: Outside Collaborator Collection
            settle(phase4::execute(source, roster), &mut warnings)
        }
        interrupted => settle(interrupted, &mut warnings),
    };

    // Phase 5: Aggregation
    roster = phase5::execute(roster, settings.sort, settings.sort_order);
    let records = roster.len();

    let outcome = if roster.is_empty() {
        info!("{}: no members or collaborators, skipping", org);
        OrgOutcome::Skipped
    } else {
        // Phase 6: Publishing
        match phase6::execute(store, &roster, settings) {
            Ok(files) => OrgOutcome::Published(files),
            Err(error) => {
                warn!("{}: {}", org, error);
                OrgOutcome::Failed(error)
            }
        }
    };

    OrgReport {
        organization: org.to_string(),
        records,
        outcome,
        warnings,
    }
}

/// Unwraps a phase result, logging and keeping the error if it was cut short.
fn settle(collection: Collection, warnings: &mut Vec<Error>) -> Roster {
    let (roster, error) = collection.into_parts();
    if let Some(error) = error {
        warn!("{}: {}", roster.organization(), error);
        warnings.push(error);
    }
    roster
}
