//! # Roster Data Model
//!
//! A [`Roster`] is the ordered list of [`MemberRecord`]s collected for one
//! organization. It is created by the membership phase, passed by value
//! through the SSO and collaborator phases, sorted, and finally lent to the
//! publisher.
//!
//! Records serialize to JSON with the same keys the sort option accepts
//! (`login`, `name`, `role`, `email`, `verifiedEmail`, `ssoEmail`,
//! `createdAt`, `updatedAt`, `location`).

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A person's relationship to an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    OrgOwner,
    Member,
    OutsideCollaborator,
}

impl Role {
    /// Maps a `membersWithRole` edge role. Only `ADMIN` denotes an owner.
    pub fn from_membership(role: &str) -> Self {
        if role == "ADMIN" {
            Role::OrgOwner
        } else {
            Role::Member
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::OrgOwner => "Org Owner",
            Role::Member => "Member",
            Role::OutsideCollaborator => "Outside Collaborator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of an organization report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub login: String,
    pub name: Option<String>,
    pub role: Role,
    /// Public profile email.
    pub email: Option<String>,
    /// Verified-domain emails joined with `", "`.
    pub verified_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_email: Option<String>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub location: Option<String>,
}

/// Ordered member and collaborator records for one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    organization: String,
    records: Vec<MemberRecord>,
}

impl Roster {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            records: Vec::new(),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn records(&self) -> &[MemberRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: MemberRecord) {
        self.records.push(record);
    }

    /// First record with the given login.
    pub fn find_mut(&mut self, login: &str) -> Option<&mut MemberRecord> {
        self.records.iter_mut().find(|r| r.login == login)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberRecord> {
        self.records.iter()
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<MemberRecord> {
        &mut self.records
    }
}

impl Extend<MemberRecord> for Roster {
    fn extend<I: IntoIterator<Item = MemberRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a MemberRecord;
    type IntoIter = std::slice::Iter<'a, MemberRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Truncates an ISO-8601 timestamp to its calendar date.
///
/// The first ten characters are kept as written, so the date is the one in
/// the timestamp's own offset (no conversion to UTC).
pub fn calendar_date(timestamp: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidTimestamp {
        value: timestamp.to_string(),
    };
    let prefix = timestamp.get(..10).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| invalid())
}

/// Renders a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Renders a verified-domain email list, keeping absence distinct from an
/// empty list.
pub fn join_emails(emails: Option<&[String]>) -> Option<String> {
    emails.map(|list| list.join(", "))
}
