//! Implementation of the per-organization report pipeline.
//!
//! ## Overview
//!
//! A run enumerates the enterprise's organizations once, then takes every
//! organization through the same sequence of phases:
//! 1. Organizations - List the enterprise's organizations (once per run)
//! 2. Members - Build the roster from the organization's membership
//! 3. SSO - Attach SAML name identifiers to existing members
//! 4. Collaborators - Append outside collaborators with their profiles
//! 5. Aggregate - Sort the roster by the configured column and order
//! 6. Publish - Write the CSV (and optional JSON) report to the repository
//!
//! The roster is owned by value and moves from phase to phase. Collecting
//! phases return a [`Collection`] so the orchestrator can tell a complete
//! roster from one interrupted by an organization-scoped failure; fatal
//! failures are the `Err` side of a `Result`.

use crate::error::Error;
use crate::roster::Roster;

// Phase modules
pub mod aggregate;
pub mod collaborators;
pub mod members;
pub mod orchestrator;
pub mod organizations;
pub mod publish;
pub mod sso;

// Numbered aliases in pipeline order
pub use aggregate as phase5;
pub use collaborators as phase4;
pub use members as phase2;
pub use organizations as phase1;
pub use publish as phase6;
pub use sso as phase3;

/// Outcome of a collecting phase for one organization.
#[derive(Debug)]
pub enum Collection {
    /// The phase ran to completion.
    Complete(Roster),
    /// The phase failed part way. `roster` holds whatever was collected
    /// before (and, for enriching phases, everything handed in).
    Interrupted { roster: Roster, error: Error },
}

impl Collection {
    /// The roster, complete or not.
    pub fn into_roster(self) -> Roster {
        match self {
            Collection::Complete(roster) => roster,
            Collection::Interrupted { roster, .. } => roster,
        }
    }

    /// Splits into the roster and the interrupting error, if any.
    pub fn into_parts(self) -> (Roster, Option<Error>) {
        match self {
            Collection::Complete(roster) => (roster, None),
            Collection::Interrupted { roster, error } => (roster, Some(error)),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Collection::Complete(_))
    }
}
