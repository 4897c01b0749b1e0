//! Report rendering.
//!
//! The CSV report has a fixed header row and one row per record, in roster
//! order. Absent values are empty cells and dates are `YYYY-MM-DD`. The JSON
//! report is the array of records, pretty-printed with two-space indentation.

use crate::error::{Error, Result};
use crate::roster::{format_date, MemberRecord, Roster};

/// CSV header row, in column order.
pub const CSV_HEADERS: [&str; 9] = [
    "Login",
    "Name",
    "Role",
    "Public email",
    "Verified email",
    "SSO email",
    "Account created",
    "Account last updated",
    "Location",
];

fn csv_row(record: &MemberRecord) -> [String; 9] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        record.login.clone(),
        text(&record.name),
        record.role.to_string(),
        text(&record.email),
        text(&record.verified_email),
        text(&record.sso_email),
        format_date(record.created_at),
        format_date(record.updated_at),
        text(&record.location),
    ]
}

/// Renders the roster as CSV.
pub fn to_csv(roster: &Roster) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in roster {
        writer.write_record(csv_row(record))?;
    }
    writer.into_inner().map_err(|err| Error::Io(err.into_error()))
}

/// Renders the roster as a pretty-printed JSON array.
pub fn to_json(roster: &Roster) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(roster.records())?;
    json.push(b'\n');
    Ok(json)
}
