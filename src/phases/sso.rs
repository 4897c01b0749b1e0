//! Phase 3: SSO Identity Resolution
//!
//! Joins SAML name identifiers onto the members already in the roster.
//!
//! ## Process
//!
//! 1.  **Unchecked**: Ask whether the organization has a SAML identity
//!     provider. Without one the phase is done and the roster is untouched.
//!
//! 2.  **Resolving**: Page through the provider's external identities. For
//!     each identity linked to a user, the record with that login gets the
//!     identity's `nameId` as its SSO email. Unlinked identities and logins
//!     not in the roster are skipped; this phase never adds records.
//!
//! 3.  **Done**: Pagination is exhausted.

use log::debug;

use super::Collection;
use crate::error::Result;
use crate::github::{ExternalIdentity, RosterSource};
use crate::pagination::Paginator;
use crate::roster::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unchecked,
    Resolving,
    Done,
}

/// Execute Phase 3: enrich members with their SSO email
pub fn execute(source: &dyn RosterSource, mut roster: Roster) -> Collection {
    let org = roster.organization().to_string();
    let mut state = State::Unchecked;

    loop {
        state = match state {
            State::Unchecked => match source.has_saml_identity_provider(&org) {
                Ok(true) => State::Resolving,
                Ok(false) => {
                    debug!("{}: no SAML identity provider", org);
                    State::Done
                }
                Err(error) => return Collection::Interrupted { roster, error },
            },
            State::Resolving => {
                let linked = match resolve(source, &org, &mut roster) {
                    Ok(count) => count,
                    Err(error) => return Collection::Interrupted { roster, error },
                };
                debug!("{}: linked {} SSO identit(ies)", org, linked);
                State::Done
            }
            State::Done => return Collection::Complete(roster),
        };
    }
}

fn resolve(source: &dyn RosterSource, org: &str, roster: &mut Roster) -> Result<usize> {
    let identities =
        Paginator::new(|cursor: Option<&str>| source.external_identities(org, cursor));
    let mut linked = 0;

    for identity in identities {
        let ExternalIdentity { name_id, login } = identity?;
        let Some(login) = login else {
            continue;
        };
        if let Some(record) = roster.find_mut(&login) {
            record.sso_email = name_id;
            linked += 1;
        }
    }
    Ok(linked)
}
