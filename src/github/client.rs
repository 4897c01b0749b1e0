//! Blocking `reqwest` implementation of the GitHub traits.
//!
//! GraphQL is used for the enterprise, membership and SAML listings; REST is
//! used for outside collaborators, user profiles and repository contents.
//! REST listings paginate with the `Link` header, and the `rel="next"` URL is
//! handed back to the paginator as the opaque cursor.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, LINK};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::queries::{self, GraphQlResponse};
use super::{
    Committer, ExternalIdentity, FileWrite, MemberEdge, RepoRef, ReportStore, RosterSource,
    UserProfile,
};
use crate::defaults;
use crate::error::{Error, Result};
use crate::pagination::{Page, PageInfo};

const USER_AGENT: &str = concat!("enterprise-roster/", env!("CARGO_PKG_VERSION"));

/// Authenticated handle to the GitHub REST and GraphQL APIs.
///
/// Constructed once per run and lent to every phase.
pub struct GitHubClient {
    http: Client,
    token: String,
    api_url: Url,
    graphql_url: Url,
}

impl GitHubClient {
    /// Creates a client for the API rooted at `api_url`
    /// (`https://api.github.com`, or `https://HOST/api/v3` on GitHub
    /// Enterprise Server).
    pub fn new(token: impl Into<String>, api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url.trim_end_matches('/'))?;
        let graphql_url = graphql_endpoint(&api_url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            token: token.into(),
            api_url,
            graphql_url,
        })
    }

    /// Report storage in the given repository.
    pub fn repository(&self, repo: RepoRef) -> RepositoryContents<'_> {
        RepositoryContents { client: self, repo }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config {
                message: format!("API URL cannot be used as a base: {}", self.api_url),
                hint: None,
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
    }

    fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!("POST {} {}", self.graphql_url, variables);
        let response = self
            .authorize(self.http.post(self.graphql_url.clone()))
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;
        let response = check_status(response)?;
        let body: GraphQlResponse<T> = response.json()?;

        if let Some(error) = body.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(Error::GraphQl {
                message: error.message,
            });
        }
        body.data.ok_or_else(|| Error::GraphQl {
            message: "response contained no data".to_string(),
        })
    }

    fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.authorize(self.http.get(url)).send()?;
        check_status(response)
    }
}

impl RosterSource for GitHubClient {
    fn enterprise_organizations(
        &self,
        enterprise: &str,
        cursor: Option<&str>,
    ) -> Result<Page<String>> {
        let data: queries::EnterpriseData = self.graphql(
            queries::ENTERPRISE_ORGANIZATIONS,
            json!({ "enterprise": enterprise, "cursor": cursor }),
        )?;
        let enterprise = data.enterprise.ok_or_else(|| Error::NotFound {
            resource: format!("enterprise {}", enterprise),
        })?;
        let connection = enterprise.organizations;
        Ok(Page::new(
            connection.nodes.into_iter().map(|n| n.login).collect(),
            connection.page_info,
        ))
    }

    fn organization_members(&self, org: &str, cursor: Option<&str>) -> Result<Page<MemberEdge>> {
        let data: queries::MembersData = self.graphql(
            queries::ORGANIZATION_MEMBERS,
            json!({ "org": org, "cursor": cursor }),
        )?;
        let organization = data.organization.ok_or_else(|| organization_not_found(org))?;
        let connection = organization.members_with_role;
        Ok(Page::new(connection.edges, connection.page_info))
    }

    fn has_saml_identity_provider(&self, org: &str) -> Result<bool> {
        let data: queries::SamlProviderData =
            self.graphql(queries::SAML_IDENTITY_PROVIDER, json!({ "org": org }))?;
        let organization = data.organization.ok_or_else(|| organization_not_found(org))?;
        Ok(organization.saml_identity_provider.is_some())
    }

    fn external_identities(
        &self,
        org: &str,
        cursor: Option<&str>,
    ) -> Result<Page<ExternalIdentity>> {
        let data: queries::IdentitiesData = self.graphql(
            queries::EXTERNAL_IDENTITIES,
            json!({ "org": org, "cursor": cursor }),
        )?;
        let provider = data
            .organization
            .ok_or_else(|| organization_not_found(org))?
            .saml_identity_provider
            .ok_or_else(|| Error::NotFound {
                resource: format!("SAML identity provider for organization {}", org),
            })?;
        let connection = provider.external_identities;
        let identities = connection
            .edges
            .into_iter()
            .map(|edge| ExternalIdentity {
                name_id: edge.node.saml_identity.and_then(|s| s.name_id),
                login: edge.node.user.map(|u| u.login),
            })
            .collect();
        Ok(Page::new(identities, connection.page_info))
    }

    fn outside_collaborators(&self, org: &str, cursor: Option<&str>) -> Result<Page<String>> {
        let url = match cursor {
            Some(next) => Url::parse(next)?,
            None => {
                let mut url = self.endpoint(&["orgs", org, "outside_collaborators"])?;
                url.query_pairs_mut()
                    .append_pair("per_page", &defaults::PAGE_SIZE.to_string());
                url
            }
        };
        let response = self.get(url)?;
        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);
        let collaborators: Vec<LoginOnly> = response.json()?;

        let page_info = match next {
            Some(next) => PageInfo::next(next),
            None => PageInfo::last(),
        };
        Ok(Page::new(
            collaborators.into_iter().map(|c| c.login).collect(),
            page_info,
        ))
    }

    fn user_profile(&self, login: &str) -> Result<UserProfile> {
        let url = self.endpoint(&["users", login])?;
        Ok(self.get(url)?.json()?)
    }
}

/// A [`ReportStore`] backed by the contents API of one repository.
pub struct RepositoryContents<'a> {
    client: &'a GitHubClient,
    repo: RepoRef,
}

impl RepositoryContents<'_> {
    fn contents_url(&self, path: &str) -> Result<Url> {
        let mut segments = vec![
            "repos",
            self.repo.owner.as_str(),
            self.repo.name.as_str(),
            "contents",
        ];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        self.client.endpoint(&segments)
    }
}

impl ReportStore for RepositoryContents<'_> {
    fn file_sha(&self, path: &str) -> Result<Option<String>> {
        match self.client.get(self.contents_url(path)?) {
            Ok(response) => {
                let meta: ContentMeta = response.json()?;
                Ok(Some(meta.sha))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_file(&self, write: &FileWrite) -> Result<String> {
        let url = self.contents_url(&write.path)?;
        let body = PutContents {
            message: &write.message,
            content: STANDARD.encode(&write.content),
            committer: &write.committer,
            sha: write.sha.as_deref(),
        };
        debug!("PUT {} (sha: {:?})", url, write.sha);
        let response = self
            .client
            .authorize(self.client.http.put(url))
            .json(&body)
            .send()?;
        let written: PutContentsResponse = check_status(response)?.json()?;
        Ok(written.content.sha)
    }

    fn describe(&self) -> String {
        self.repo.to_string()
    }
}

#[derive(Deserialize)]
struct LoginOnly {
    login: String,
}

#[derive(Deserialize)]
struct ContentMeta {
    sha: String,
}

#[derive(Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    committer: &'a Committer,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Deserialize)]
struct PutContentsResponse {
    content: ContentMeta,
}

fn organization_not_found(org: &str) -> Error {
    Error::NotFound {
        resource: format!("organization {}", org),
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let message = response.text().unwrap_or_default();
    Err(Error::Api {
        url,
        status: status.as_u16(),
        message,
    })
}

/// `https://api.github.com` -> `https://api.github.com/graphql`;
/// `https://HOST/api/v3` -> `https://HOST/api/graphql`.
fn graphql_endpoint(api_url: &Url) -> Result<Url> {
    let base = api_url.as_str().trim_end_matches('/');
    let endpoint = match base.strip_suffix("/v3") {
        Some(root) => format!("{}/graphql", root),
        None => format!("{}/graphql", base),
    };
    Ok(Url::parse(&endpoint)?)
}

/// Extracts the `rel="next"` target from a `Link` header.
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
