//! # GitHub Access
//!
//! The pipeline talks to GitHub through two narrow traits so the phases can be
//! exercised against in-memory fakes:
//!
//! - **`RosterSource`**: the read side. One method per upstream listing, each
//!   returning a single [`Page`] for a given cursor. Phases wrap these in a
//!   [`Paginator`](crate::pagination::Paginator).
//!
//! - **`ReportStore`**: the write side. Probes a path in the destination
//!   repository for its current blob SHA and creates or updates a file.
//!
//! [`GitHubClient`] implements `RosterSource` directly and hands out a
//! [`RepositoryContents`] implementing `ReportStore` for one repository.

mod client;
mod queries;

pub use client::{GitHubClient, RepositoryContents};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::pagination::Page;

/// Read access to the enterprise, organization and user listings.
pub trait RosterSource {
    /// Organization logins belonging to an enterprise.
    fn enterprise_organizations(&self, enterprise: &str, cursor: Option<&str>)
        -> Result<Page<String>>;

    /// Members of an organization together with their role.
    fn organization_members(&self, org: &str, cursor: Option<&str>) -> Result<Page<MemberEdge>>;

    /// Whether the organization has a SAML identity provider configured.
    fn has_saml_identity_provider(&self, org: &str) -> Result<bool>;

    /// External identities known to the organization's SAML provider.
    fn external_identities(&self, org: &str, cursor: Option<&str>)
        -> Result<Page<ExternalIdentity>>;

    /// Logins of the organization's outside collaborators.
    fn outside_collaborators(&self, org: &str, cursor: Option<&str>) -> Result<Page<String>>;

    /// Public profile of a user.
    fn user_profile(&self, login: &str) -> Result<UserProfile>;
}

/// Write access to files in the destination repository.
pub trait ReportStore {
    /// Blob SHA of the file at `path`, or `None` when it does not exist.
    fn file_sha(&self, path: &str) -> Result<Option<String>>;

    /// Creates the file, or updates it when `write.sha` carries the current
    /// blob SHA. Returns the SHA of the written blob.
    fn write_file(&self, write: &FileWrite) -> Result<String>;

    /// Human-readable name of the destination, for log lines.
    fn describe(&self) -> String;
}

/// A `membersWithRole` edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberEdge {
    pub role: String,
    pub node: MemberNode,
}

/// User fields selected on a membership edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberNode {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization_verified_domain_emails: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
    pub location: Option<String>,
}

/// A SAML external identity, flattened to the two fields the join uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// The provider-side name identifier (usually an email address).
    pub name_id: Option<String>,
    /// Login of the linked GitHub user; `None` when never linked.
    pub login: Option<String>,
}

/// Profile fields returned by the REST users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub location: Option<String>,
}

/// Identity attached to generated commits.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// A create-or-update request for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub path: String,
    pub message: String,
    pub content: Vec<u8>,
    pub committer: Committer,
    /// Current blob SHA when updating an existing file.
    pub sha: Option<String>,
}

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoRef {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::Config {
                message: format!("Invalid repository {:?}", s),
                hint: Some("Use the owner/name form, e.g. acme/reports".to_string()),
            }),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
