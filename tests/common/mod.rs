//! Shared test utilities for integration and E2E tests.
//!
//! `FakeGitHub` serves a small enterprise from a `mockito` server: enterprise
//! `acme` with one organization `eng`, whose SAML provider links `alice`, with
//! members `alice` (owner) and `carol` and one outside collaborator `bob`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let github = FakeGitHub::acme();
//! let mut cmd = roster_cmd();
//! cmd.args(["report", "--api-url", &github.url()]);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{roster_cmd, FakeGitHub, ENG_CSV};
}

/// The report expected for `eng`, sorted by login.
pub const ENG_CSV: &str = "\
Login,Name,Role,Public email,Verified email,SSO email,Account created,Account last updated,Location
alice,Alice,Org Owner,,alice@acme.com,alice@idp.acme.com,2019-01-02,2024-01-02,
bob,Bob,Outside Collaborator,bob@example.com,,,2018-07-08,2023-03-04,Lisbon
carol,,Member,,,,2020-05-06,2024-02-03,Berlin
";

/// Variables that would leak a developer's or CI runner's configuration into
/// the binary under test.
const AMBIENT_ENV: &[&str] = &[
    "INPUT_TOKEN",
    "INPUT_ENTERPRISE",
    "INPUT_SORT",
    "INPUT_SORT-ORDER",
    "INPUT_COMMITTER-NAME",
    "INPUT_COMMITTER-EMAIL",
    "INPUT_JSON",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
    "GITHUB_EVENT_PATH",
    "GITHUB_ACTIONS",
    "ENTERPRISE_ROSTER_CONFIG",
    "RUST_LOG",
];

/// The `enterprise-roster` binary with a clean environment.
pub fn roster_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("enterprise-roster");
    for var in AMBIENT_ENV {
        cmd.env_remove(var);
    }
    cmd
}

fn graphql(
    server: &mut ServerGuard,
    query: &str,
    variables: serde_json::Value,
    data: &str,
) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(query.to_string()),
            Matcher::PartialJson(json!({ "variables": variables })),
        ]))
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"data": {}}}"#, data))
        .create()
}

/// A mock GitHub serving the `acme` enterprise.
pub struct FakeGitHub {
    pub server: ServerGuard,
    pub reads: Vec<Mock>,
}

impl FakeGitHub {
    pub fn acme() -> Self {
        let mut server = Server::new();
        let mut reads = Vec::new();

        reads.push(graphql(
            &mut server,
            r"organizations\(first",
            json!({ "enterprise": "acme" }),
            r#"{"enterprise": {"organizations": {
                "nodes": [{"login": "eng"}],
                "pageInfo": {"hasNextPage": false, "endCursor": null}
            }}}"#,
        ));
        reads.push(graphql(
            &mut server,
            "membersWithRole",
            json!({ "org": "eng" }),
            r#"{"organization": {"membersWithRole": {
                "edges": [
                    {"role": "MEMBER", "node": {"login": "carol", "name": null, "email": "",
                     "organizationVerifiedDomainEmails": null,
                     "createdAt": "2020-05-06T10:00:00Z", "updatedAt": "2024-02-03T10:00:00Z",
                     "location": "Berlin"}},
                    {"role": "ADMIN", "node": {"login": "alice", "name": "Alice", "email": null,
                     "organizationVerifiedDomainEmails": ["alice@acme.com"],
                     "createdAt": "2019-01-02T03:04:05Z", "updatedAt": "2024-01-02T03:04:05Z",
                     "location": null}}
                ],
                "pageInfo": {"hasNextPage": false, "endCursor": null}
            }}}"#,
        ));
        reads.push(graphql(
            &mut server,
            r"samlIdentityProvider \{\\n\s*id",
            json!({ "org": "eng" }),
            r#"{"organization": {"samlIdentityProvider": {"id": "SIP_1"}}}"#,
        ));
        reads.push(graphql(
            &mut server,
            "externalIdentities",
            json!({ "org": "eng" }),
            r#"{"organization": {"samlIdentityProvider": {"externalIdentities": {
                "edges": [
                    {"node": {"samlIdentity": {"nameId": "alice@idp.acme.com"}, "user": {"login": "alice"}}},
                    {"node": {"samlIdentity": {"nameId": "nobody@idp.acme.com"}, "user": null}}
                ],
                "pageInfo": {"hasNextPage": false, "endCursor": null}
            }}}}"#,
        ));
        reads.push(
            server
                .mock("GET", "/orgs/eng/outside_collaborators")
                .match_query(Matcher::Any)
                .with_header("content-type", "application/json")
                .with_body(r#"[{"login": "bob"}]"#)
                .create(),
        );
        reads.push(
            server
                .mock("GET", "/users/bob")
                .with_header("content-type", "application/json")
                .with_body(
                    r#"{"login": "bob", "name": "Bob", "email": "bob@example.com",
                        "created_at": "2018-07-08T09:10:11Z", "updated_at": "2023-03-04T05:06:07Z",
                        "location": "Lisbon"}"#,
                )
                .create(),
        );

        Self { server, reads }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Serves `path` in `acme/reports` as absent.
    pub fn missing_report(&mut self, path: &str) -> Mock {
        self.server
            .mock("GET", format!("/repos/acme/reports/contents/{}", path).as_str())
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create()
    }

    /// Serves `path` in `acme/reports` as existing with blob `sha`.
    pub fn existing_report(&mut self, path: &str, sha: &str) -> Mock {
        self.server
            .mock("GET", format!("/repos/acme/reports/contents/{}", path).as_str())
            .with_header("content-type", "application/json")
            .with_body(json!({ "path": path, "sha": sha }).to_string())
            .create()
    }

    /// Expects one write of `content` to `path`, carrying `sha` when given.
    pub fn expect_write(&mut self, path: &str, content: &str, sha: Option<&str>) -> Mock {
        let mut expected = json!({
            "content": STANDARD.encode(content),
            "committer": { "name": "github-actions", "email": "github-actions@github.com" },
        });
        if let Some(sha) = sha {
            expected["sha"] = json!(sha);
        }
        self.server
            .mock("PUT", format!("/repos/acme/reports/contents/{}", path).as_str())
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(expected),
                Matcher::Regex(r#""message":"\d{4}-\d{2}-\d{2} User totals report""#.to_string()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({ "content": { "path": path, "sha": "written-sha" } }).to_string())
            .expect(1)
            .create()
    }

    /// Asserts every read endpoint was hit.
    pub fn assert_reads(&self) {
        for mock in &self.reads {
            mock.assert();
        }
    }
}
