//! Phase 4: Outside Collaborator Collection
//!
//! Appends the organization's outside collaborators to the roster. The
//! collaborator listing only carries logins, so every login costs one
//! profile lookup for the remaining columns.
//!
//! The phase is all or nothing: collaborators are gathered aside and appended
//! only once the listing and every lookup succeeded. On failure the roster
//! handed in comes back unchanged.

use log::debug;

use super::Collection;
use crate::error::Result;
use crate::github::{RosterSource, UserProfile};
use crate::pagination::Paginator;
use crate::roster::{calendar_date, MemberRecord, Role, Roster};

/// Execute Phase 4: append outside collaborators
pub fn execute(source: &dyn RosterSource, mut roster: Roster) -> Collection {
    match collect(source, roster.organization()) {
        Ok(collaborators) => {
            debug!(
                "{}: {} outside collaborator(s)",
                roster.organization(),
                collaborators.len()
            );
            roster.extend(collaborators);
            Collection::Complete(roster)
        }
        Err(error) => Collection::Interrupted { roster, error },
    }
}

fn collect(source: &dyn RosterSource, org: &str) -> Result<Vec<MemberRecord>> {
    let logins = Paginator::new(|cursor: Option<&str>| source.outside_collaborators(org, cursor));

    let mut collaborators = Vec::new();
    for login in logins {
        let profile = source.user_profile(&login?)?;
        collaborators.push(to_record(profile)?);
    }
    Ok(collaborators)
}

fn to_record(profile: UserProfile) -> Result<MemberRecord> {
    Ok(MemberRecord {
        role: Role::OutsideCollaborator,
        verified_email: None,
        sso_email: None,
        created_at: calendar_date(&profile.created_at)?,
        updated_at: calendar_date(&profile.updated_at)?,
        login: profile.login,
        name: profile.name,
        email: profile.email,
        location: profile.location,
    })
}
