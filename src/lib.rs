//! # Enterprise Roster Library
//!
//! Collects the members and outside collaborators of every organization in a
//! GitHub enterprise and publishes one report per organization into a
//! destination repository. It backs the `enterprise-roster` command-line
//! tool.
//!
//! ## Quick Example
//!
//! ```
//! use enterprise_roster::phases::aggregate::{self, SortColumn, SortOrder};
//! use enterprise_roster::report;
//! use enterprise_roster::roster::{calendar_date, MemberRecord, Role, Roster};
//!
//! let mut roster = Roster::new("eng");
//! for login in ["user10", "user2"] {
//!     roster.push(MemberRecord {
//!         login: login.to_string(),
//!         name: None,
//!         role: Role::Member,
//!         email: None,
//!         verified_email: None,
//!         sso_email: None,
//!         created_at: calendar_date("2020-01-02T03:04:05Z").unwrap(),
//!         updated_at: calendar_date("2024-05-06T07:08:09Z").unwrap(),
//!         location: None,
//!     });
//! }
//!
//! let roster = aggregate::execute(roster, SortColumn::Login, SortOrder::Ascending);
//! let csv = String::from_utf8(report::to_csv(&roster).unwrap()).unwrap();
//! assert!(csv.lines().nth(1).unwrap().starts_with("user2,"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Sources and stores (`github`)**: `RosterSource` is everything read from
//!   GitHub, `ReportStore` is where reports are written. `GitHubClient`
//!   implements both over the REST and GraphQL APIs.
//! - **Pagination (`pagination`)**: every listing is a lazy iterator that
//!   follows cursors until the last page.
//! - **Rosters (`roster`)**: the ordered records of one organization.
//! - **Phases (`phases`)**: the per-organization pipeline, driven by
//!   `phases::orchestrator`.
//! - **Reports (`report`)**: CSV and JSON rendering.
//!
//! ## Execution Flow
//!
//! 1.  **Organizations**: List the enterprise's organizations.
//! 2.  **Members**: Build each organization's roster from its membership.
//! 3.  **SSO**: Attach SAML identities to members when SSO is configured.
//! 4.  **Collaborators**: Append outside collaborators.
//! 5.  **Aggregate**: Sort by the configured column and order.
//! 6.  **Publish**: Create or update `reports/<org>.csv` (and `.json`).
//!
//! Only step 1 can fail a run; later failures are scoped to one organization.

pub mod config;
pub mod defaults;
pub mod error;
pub mod github;
pub mod natural;
pub mod output;
pub mod pagination;
pub mod phases;
pub mod report;
pub mod roster;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;
