//! GraphQL documents and the response shapes they decode into.

use serde::Deserialize;

use super::MemberEdge;
use crate::pagination::PageInfo;

pub(super) const ENTERPRISE_ORGANIZATIONS: &str = r#"
query ($enterprise: String!, $cursor: String) {
  enterprise(slug: $enterprise) {
    organizations(first: 100, after: $cursor) {
      nodes {
        login
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

pub(super) const ORGANIZATION_MEMBERS: &str = r#"
query ($org: String!, $cursor: String) {
  organization(login: $org) {
    membersWithRole(first: 100, after: $cursor) {
      edges {
        node {
          login
          name
          email
          organizationVerifiedDomainEmails(login: $org)
          createdAt
          updatedAt
          location
        }
        role
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

pub(super) const SAML_IDENTITY_PROVIDER: &str = r#"
query ($org: String!) {
  organization(login: $org) {
    samlIdentityProvider {
      id
    }
  }
}
"#;

pub(super) const EXTERNAL_IDENTITIES: &str = r#"
query ($org: String!, $cursor: String) {
  organization(login: $org) {
    samlIdentityProvider {
      externalIdentities(first: 100, after: $cursor) {
        edges {
          node {
            samlIdentity {
              nameId
            }
            user {
              login
            }
          }
        }
        pageInfo {
          hasNextPage
          endCursor
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlError {
    pub message: String,
}

/// `nodes` + `pageInfo` connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NodeConnection<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
}

/// `edges` + `pageInfo` connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EdgeConnection<T> {
    pub edges: Vec<T>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EnterpriseData {
    pub enterprise: Option<Enterprise>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Enterprise {
    pub organizations: NodeConnection<LoginNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MembersData {
    pub organization: Option<MembersOrganization>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MembersOrganization {
    pub members_with_role: EdgeConnection<MemberEdge>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SamlProviderData {
    pub organization: Option<SamlProviderOrganization>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SamlProviderOrganization {
    pub saml_identity_provider: Option<SamlProviderId>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SamlProviderId {
    #[allow(dead_code)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdentitiesData {
    pub organization: Option<IdentitiesOrganization>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdentitiesOrganization {
    pub saml_identity_provider: Option<IdentityProvider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdentityProvider {
    pub external_identities: EdgeConnection<IdentityEdge>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdentityEdge {
    pub node: IdentityNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdentityNode {
    pub saml_identity: Option<SamlIdentity>,
    pub user: Option<LoginNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SamlIdentity {
    pub name_id: Option<String>,
}
