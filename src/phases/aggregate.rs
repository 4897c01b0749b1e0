//! Phase 5: Aggregation
//!
//! Orders the finished roster by one column in natural order. The sort is
//! stable, records with no value for the column go last when ascending, and
//! descending is the exact reverse of ascending, so the empty values lead.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::natural;
use crate::roster::{format_date, MemberRecord, Roster};

/// A roster column that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Login,
    Name,
    Role,
    Email,
    VerifiedEmail,
    SsoEmail,
    CreatedAt,
    UpdatedAt,
    Location,
}

impl SortColumn {
    pub const ALL: [SortColumn; 9] = [
        SortColumn::Login,
        SortColumn::Name,
        SortColumn::Role,
        SortColumn::Email,
        SortColumn::VerifiedEmail,
        SortColumn::SsoEmail,
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
        SortColumn::Location,
    ];

    /// The JSON key for this column.
    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::Login => "login",
            SortColumn::Name => "name",
            SortColumn::Role => "role",
            SortColumn::Email => "email",
            SortColumn::VerifiedEmail => "verifiedEmail",
            SortColumn::SsoEmail => "ssoEmail",
            SortColumn::CreatedAt => "createdAt",
            SortColumn::UpdatedAt => "updatedAt",
            SortColumn::Location => "location",
        }
    }

    /// The record's value in this column, rendered the way reports show it.
    pub fn value<'a>(&self, record: &'a MemberRecord) -> Option<Cow<'a, str>> {
        match self {
            SortColumn::Login => Some(Cow::Borrowed(record.login.as_str())),
            SortColumn::Name => record.name.as_deref().map(Cow::Borrowed),
            SortColumn::Role => Some(Cow::Borrowed(record.role.as_str())),
            SortColumn::Email => record.email.as_deref().map(Cow::Borrowed),
            SortColumn::VerifiedEmail => record.verified_email.as_deref().map(Cow::Borrowed),
            SortColumn::SsoEmail => record.sso_email.as_deref().map(Cow::Borrowed),
            SortColumn::CreatedAt => Some(Cow::Owned(format_date(record.created_at))),
            SortColumn::UpdatedAt => Some(Cow::Owned(format_date(record.updated_at))),
            SortColumn::Location => record.location.as_deref().map(Cow::Borrowed),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortColumn {
    type Err = Error;

    /// Accepts the JSON key or its snake_case spelling, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        Self::ALL
            .into_iter()
            .find(|column| column.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownSortColumn {
                column: s.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(SortColumn::key)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Direction of the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(Error::Config {
                message: format!("Unknown sort order: {}", s),
                hint: Some("Use 'asc' or 'desc'".to_string()),
            }),
        }
    }
}

/// Compares two records on `column` in ascending order.
pub fn compare(column: SortColumn, a: &MemberRecord, b: &MemberRecord) -> Ordering {
    natural::compare_optional(column.value(a).as_deref(), column.value(b).as_deref())
}

/// Execute Phase 5: sort the roster
pub fn execute(mut roster: Roster, column: SortColumn, order: SortOrder) -> Roster {
    debug!(
        "{}: sorting {} record(s) by {} {}",
        roster.organization(),
        roster.len(),
        column,
        order
    );
    let records = roster.records_mut();
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| compare(column, a, b)),
        SortOrder::Descending => records.sort_by(|a, b| compare(column, b, a)),
    }
    roster
}
