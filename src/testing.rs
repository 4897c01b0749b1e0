//! In-memory GitHub fakes and fixtures shared by the unit tests.
//!
//! `MockGitHub` serves pre-split pages for every listing. The cursor for page
//! `n` is `"page-n"`. Every request is recorded as `"<source> <key> page=<n>"`
//! (or `"<source> <key>"` for unpaginated lookups), and any recorded key that
//! appears in `failures` returns an error instead.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::defaults;
use crate::error::{Error, Result};
use crate::github::{
    ExternalIdentity, FileWrite, MemberEdge, MemberNode, RepoRef, ReportStore, RosterSource,
    UserProfile,
};
use crate::phases::aggregate::{SortColumn, SortOrder};
use crate::pagination::{Page, PageInfo};
use crate::roster::{MemberRecord, Role};

#[derive(Default)]
pub(crate) struct MockGitHub {
    pub enterprise: String,
    pub organizations: Vec<Vec<String>>,
    pub members: HashMap<String, Vec<Vec<MemberEdge>>>,
    pub saml: HashSet<String>,
    pub identities: HashMap<String, Vec<Vec<ExternalIdentity>>>,
    pub collaborators: HashMap<String, Vec<Vec<String>>>,
    pub profiles: HashMap<String, UserProfile>,
    pub failures: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockGitHub {
    pub fn new(enterprise: &str) -> Self {
        Self {
            enterprise: enterprise.to_string(),
            ..Default::default()
        }
    }

    pub fn with_organizations(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.organizations = pages
            .into_iter()
            .map(|page| page.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    pub fn with_members(mut self, org: &str, pages: Vec<Vec<MemberEdge>>) -> Self {
        self.members.insert(org.to_string(), pages);
        self
    }

    pub fn with_saml(mut self, org: &str, pages: Vec<Vec<ExternalIdentity>>) -> Self {
        self.saml.insert(org.to_string());
        self.identities.insert(org.to_string(), pages);
        self
    }

    pub fn with_collaborators(mut self, org: &str, pages: Vec<Vec<&str>>) -> Self {
        for login in pages.iter().flatten() {
            self.profiles
                .entry(login.to_string())
                .or_insert_with(|| profile(login));
        }
        self.collaborators.insert(
            org.to_string(),
            pages
                .into_iter()
                .map(|page| page.into_iter().map(str::to_string).collect())
                .collect(),
        );
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profiles.insert(profile.login.clone(), profile);
        self
    }

    pub fn failing(mut self, call: &str) -> Self {
        self.failures.insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failures.contains(&call) {
            return Err(Error::Api {
                url: format!("mock://{}", call),
                status: 502,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn serve<T: Clone>(
        &self,
        source: &str,
        key: &str,
        pages: Option<&Vec<Vec<T>>>,
        cursor: Option<&str>,
    ) -> Result<Page<T>> {
        let index = page_index(cursor);
        self.record(format!("{} {} page={}", source, key, index))?;
        let pages = pages.ok_or_else(|| Error::NotFound {
            resource: format!("{} {}", source, key),
        })?;
        let items = pages.get(index).cloned().unwrap_or_default();
        let page_info = if index + 1 < pages.len() {
            PageInfo::next(format!("page-{}", index + 1))
        } else {
            PageInfo::last()
        };
        Ok(Page::new(items, page_info))
    }
}

fn page_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix("page-"))
        .map(|n| n.parse().expect("mock cursor"))
        .unwrap_or(0)
}

impl RosterSource for MockGitHub {
    fn enterprise_organizations(
        &self,
        enterprise: &str,
        cursor: Option<&str>,
    ) -> Result<Page<String>> {
        let pages = (enterprise == self.enterprise).then_some(&self.organizations);
        self.serve("organizations", enterprise, pages, cursor)
    }

    fn organization_members(&self, org: &str, cursor: Option<&str>) -> Result<Page<MemberEdge>> {
        self.serve("members", org, self.members.get(org), cursor)
    }

    fn has_saml_identity_provider(&self, org: &str) -> Result<bool> {
        self.record(format!("saml {}", org))?;
        Ok(self.saml.contains(org))
    }

    fn external_identities(
        &self,
        org: &str,
        cursor: Option<&str>,
    ) -> Result<Page<ExternalIdentity>> {
        self.serve("identities", org, self.identities.get(org), cursor)
    }

    fn outside_collaborators(&self, org: &str, cursor: Option<&str>) -> Result<Page<String>> {
        let empty = Vec::new();
        let pages = Some(self.collaborators.get(org).unwrap_or(&empty));
        self.serve("collaborators", org, pages, cursor)
    }

    fn user_profile(&self, login: &str) -> Result<UserProfile> {
        self.record(format!("profile {}", login))?;
        self.profiles.get(login).cloned().ok_or_else(|| Error::Api {
            url: format!("mock://users/{}", login),
            status: 404,
            message: "Not Found".to_string(),
        })
    }
}

/// Repository contents kept in memory, with GitHub's SHA rules: updating an
/// existing file requires its current SHA.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub files: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub writes: Mutex<Vec<FileWrite>>,
    pub fail_paths: HashSet<String>,
    next_sha: Mutex<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.fail_paths.insert(path.to_string());
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(content, _)| String::from_utf8(content.clone()).unwrap())
    }

    pub fn sha(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|(_, sha)| sha.clone())
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn writes(&self) -> Vec<FileWrite> {
        self.writes.lock().unwrap().clone()
    }
}

impl ReportStore for MemoryStore {
    fn file_sha(&self, path: &str) -> Result<Option<String>> {
        Ok(self.sha(path))
    }

    fn write_file(&self, write: &FileWrite) -> Result<String> {
        self.writes.lock().unwrap().push(write.clone());
        if self.fail_paths.contains(&write.path) {
            return Err(Error::Api {
                url: format!("mock://contents/{}", write.path),
                status: 500,
                message: "injected failure".to_string(),
            });
        }

        let mut files = self.files.lock().unwrap();
        let current = files.get(&write.path).map(|(_, sha)| sha.clone());
        if current != write.sha {
            return Err(Error::Api {
                url: format!("mock://contents/{}", write.path),
                status: if current.is_some() { 409 } else { 422 },
                message: format!("sha mismatch: have {:?}, got {:?}", current, write.sha),
            });
        }

        let mut next_sha = self.next_sha.lock().unwrap();
        *next_sha += 1;
        let sha = format!("sha-{}", *next_sha);
        files.insert(write.path.clone(), (write.content.clone(), sha.clone()));
        Ok(sha)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

pub(crate) fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub(crate) fn member(login: &str, role: &str) -> MemberEdge {
    MemberEdge {
        role: role.to_string(),
        node: MemberNode {
            login: login.to_string(),
            name: Some(format!("{} name", login)),
            email: None,
            organization_verified_domain_emails: None,
            created_at: "2020-01-02T03:04:05Z".to_string(),
            updated_at: "2024-05-06T07:08:09Z".to_string(),
            location: None,
        },
    }
}

pub(crate) fn profile(login: &str) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        name: None,
        email: None,
        created_at: "2018-07-08T09:10:11Z".to_string(),
        updated_at: "2023-03-04T05:06:07Z".to_string(),
        location: None,
    }
}

pub(crate) fn identity(login: Option<&str>, name_id: &str) -> ExternalIdentity {
    ExternalIdentity {
        name_id: Some(name_id.to_string()),
        login: login.map(str::to_string),
    }
}

pub(crate) fn record(login: &str, role: Role) -> MemberRecord {
    MemberRecord {
        login: login.to_string(),
        name: None,
        role,
        email: None,
        verified_email: None,
        sso_email: None,
        created_at: date("2020-01-02"),
        updated_at: date("2024-05-06"),
        location: None,
    }
}

pub(crate) fn settings() -> Settings {
    Settings {
        token: "secret".to_string(),
        enterprise: "acme".to_string(),
        repository: RepoRef {
            owner: "acme".to_string(),
            name: "reports".to_string(),
        },
        sort: SortColumn::Login,
        sort_order: SortOrder::Ascending,
        committer: defaults::committer(),
        json: false,
        api_url: defaults::API_URL.to_string(),
    }
}
