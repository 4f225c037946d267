//! GitHub provider - Repository discovery via GraphQL, file contents via REST

use serde::{Deserialize, Serialize};
use std::process::Command;
use std::time::Duration;
use url::Url;

use super::{is_workflow_file, ContentSource, RepositoryListing};
use crate::config::{GitHubConfig, ScanConfig};
use crate::error::{ActionLensError, ConfigError, ProviderError};

const USER_AGENT: &str = concat!("actionlens/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const REPOSITORIES_QUERY: &str = r#"
query($org: String!, $cursor: String, $pageSize: Int!, $expression: String!) {
  organization(login: $org) {
    repositories(first: $pageSize, after: $cursor) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        name
        object(expression: $expression) {
          ... on Tree {
            entries {
              name
              path
              type
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: QueryVariables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryVariables<'a> {
    org: &'a str,
    cursor: Option<&'a str>,
    page_size: u32,
    expression: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryConnection {
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    name: String,
    object: Option<TreeObject>,
}

/// A git object; only trees carry entries
#[derive(Debug, Default, Deserialize)]
struct TreeObject {
    #[serde(default)]
    entries: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

impl RepositoryNode {
    fn into_listing(self, extensions: &[String]) -> RepositoryListing {
        let workflows = self
            .object
            .unwrap_or_default()
            .entries
            .into_iter()
            .filter(|entry| entry.kind == "blob" && is_workflow_file(&entry.name, extensions))
            .map(|entry| entry.path)
            .collect();
        RepositoryListing::new(self.name, workflows)
    }
}

/// Unpack one GraphQL page, mapping API errors to provider errors
fn parse_page(
    response: GraphQlResponse,
    organization: &str,
) -> Result<RepositoryConnection, ProviderError> {
    if let Some(organization) = response.data.and_then(|data| data.organization) {
        return Ok(organization.repositories);
    }

    if response.errors.is_empty()
        || response
            .errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
    {
        return Err(ProviderError::OrganizationNotFound {
            organization: organization.to_string(),
        });
    }

    let message = response
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ProviderError::GraphQl { message })
}

/// Content source backed by the GitHub API
pub struct GitHubSource {
    client: reqwest::Client,
    token: String,
    api_url: Url,
    graphql_url: String,
    scan: ScanConfig,
}

impl GitHubSource {
    /// Create a source, resolving the token from the environment or the gh CLI
    pub fn new(github: &GitHubConfig, scan: &ScanConfig) -> Result<Self, ActionLensError> {
        let token = resolve_token(github)?;
        Self::with_token(token, github, scan)
    }

    /// Create a source with an explicit token
    pub fn with_token(
        token: impl Into<String>,
        github: &GitHubConfig,
        scan: &ScanConfig,
    ) -> Result<Self, ActionLensError> {
        let api_url = Url::parse(&github.api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::Invalid {
                field: "github.api_url".to_string(),
                message: format!("'{}' is not a base URL", github.api_url),
            })?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            api_url,
            graphql_url: github.graphql_url.clone(),
            scan: scan.clone(),
        })
    }

    fn tree_expression(&self) -> String {
        format!(
            "{}:{}",
            self.scan.git_ref,
            self.scan.workflow_dir.trim_matches('/')
        )
    }

    /// `{api}/repos/{org}/{repo}/contents/{path}?ref={ref}`, each part percent-encoded
    fn contents_url(&self, organization: &str, repository: &str, path: &str) -> Url {
        let mut url = self.api_url.clone();
        // `api_url` is checked to be a base URL on construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", organization, repository, "contents"])
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.scan.git_ref);
        url
    }

    async fn query_page(
        &self,
        organization: &str,
        cursor: Option<&str>,
        expression: &str,
    ) -> Result<RepositoryConnection, ActionLensError> {
        let request = GraphQlRequest {
            query: REPOSITORIES_QUERY,
            variables: QueryVariables {
                org: organization,
                cursor,
                page_size: self.scan.page_size,
                expression,
            },
        };

        let resp = self
            .client
            .post(&self.graphql_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status {
                url: self.graphql_url.clone(),
                status: resp.status().as_u16(),
            }
            .into());
        }

        let response: GraphQlResponse = resp.json().await?;
        Ok(parse_page(response, organization)?)
    }
}

#[async_trait::async_trait]
impl ContentSource for GitHubSource {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryListing>, ActionLensError> {
        let expression = self.tree_expression();
        let mut cursor: Option<String> = None;
        let mut listings = Vec::new();
        let mut page = 0usize;

        loop {
            page += 1;
            let connection = self
                .query_page(organization, cursor.as_deref(), &expression)
                .await?;
            tracing::debug!(
                page,
                repositories = connection.nodes.len(),
                "Fetched repository page"
            );

            listings.extend(
                connection
                    .nodes
                    .into_iter()
                    .flatten()
                    .map(|node| node.into_listing(&self.scan.extensions)),
            );

            match (connection.page_info.has_next_page, connection.page_info.end_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        Ok(listings)
    }

    async fn fetch_workflow(
        &self,
        organization: &str,
        repository: &str,
        path: &str,
    ) -> Result<String, ActionLensError> {
        let url = self.contents_url(organization, repository, path);
        let resp = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, RAW_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            }
            .into());
        }

        Ok(resp.text().await?)
    }
}

/// Resolve a GitHub token: configured environment variables first, then `gh auth token`
pub fn resolve_token(config: &GitHubConfig) -> Result<String, ActionLensError> {
    if let Some(token) = token_from_env(&config.token_env) {
        return Ok(token);
    }

    token_from_gh_cli().ok_or_else(|| ProviderError::MissingToken.into())
}

fn token_from_env(variables: &[String]) -> Option<String> {
    variables
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn token_from_gh_cli() -> Option<String> {
    let gh = which::which("gh").ok()?;
    let output = Command::new(gh).args(["auth", "token"]).output().ok()?;

    if !output.status.success() {
        tracing::debug!("gh auth token exited with {}", output.status);
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
