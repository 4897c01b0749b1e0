//! Phase 2: Membership Collection
//!
//! Builds a fresh roster from the organization's `membersWithRole`
//! connection.
//!
//! ## Process
//!
//! 1.  **Paginate**: Every page of membership edges is fetched in order.
//!
//! 2.  **Map**: Each edge becomes a [`MemberRecord`]. The `ADMIN` role maps to
//!     Org Owner and anything else to Member; timestamps are truncated to
//!     calendar dates; verified-domain emails are joined with `", "`.
//!
//! A failure part way through is organization-scoped: the records mapped so
//! far are returned alongside the error.

use log::debug;

use super::Collection;
use crate::error::Result;
use crate::github::{MemberEdge, RosterSource};
use crate::pagination::Paginator;
use crate::roster::{calendar_date, join_emails, MemberRecord, Role, Roster};

/// Execute Phase 2: collect an organization's members into a new roster
pub fn execute(source: &dyn RosterSource, org: &str) -> Collection {
    let mut roster = Roster::new(org);
    let pages = Paginator::new(|cursor: Option<&str>| source.organization_members(org, cursor));

    for edge in pages {
        match edge.and_then(to_record) {
            Ok(record) => roster.push(record),
            Err(error) => return Collection::Interrupted { roster, error },
        }
    }

    debug!("{}: {} member(s)", org, roster.len());
    Collection::Complete(roster)
}

fn to_record(edge: MemberEdge) -> Result<MemberRecord> {
    let node = edge.node;
    Ok(MemberRecord {
        role: Role::from_membership(&edge.role),
        verified_email: join_emails(node.organization_verified_domain_emails.as_deref()),
        sso_email: None,
        created_at: calendar_date(&node.created_at)?,
        updated_at: calendar_date(&node.updated_at)?,
        login: node.login,
        name: node.name,
        email: node.email,
        location: node.location,
    })
}
