//! GitHub REST data source
//!
//! Tree listings and account repositories come from the REST API; file contents come
//! from the raw content host, which does not count against the API quota. Authentication
//! is optional and only raises the request quota.
//!
//! # Example
//!
//! ```no_run
//! use gitstack::source::{GitHubSource, RepoRef, RepositoryDataSource};
//! use gitstack::GitstackConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = GitHubSource::from_config(&GitstackConfig::default())?;
//! let paths = source.tree(&RepoRef::new("rust-lang", "cargo")).await?;
//! println!("{} paths", paths.len());
//! # Ok(())
//! # }
//! ```

use super::{RepoRef, RepoSummary, RepositoryDataSource, SourceError};
use crate::config::GitstackConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const API_VERSION: &str = "2022-11-28";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const REPOS_PER_PAGE: usize = 100;
const MAX_REPO_PAGES: usize = 3;

#[derive(Debug, Deserialize)]
struct RepoMetadata {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct OwnerDto {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoDto {
    name: String,
    owner: OwnerDto,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
}

impl From<RepoDto> for RepoSummary {
    fn from(dto: RepoDto) -> Self {
        RepoSummary {
            name: dto.name,
            owner: dto.owner.login,
            default_branch: dto.default_branch.unwrap_or_else(|| "main".to_string()),
            stargazers_count: dto.stargazers_count,
            pushed_at: dto.pushed_at,
        }
    }
}

pub struct GitHubSource {
    http_client: Client,
    api_url: String,
    raw_url: String,
    token: Option<String>,
}

impl GitHubSource {
    pub fn new(
        api_url: impl Into<String>,
        raw_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            raw_url: raw_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &GitstackConfig) -> Result<Self> {
        Self::new(
            &config.api_url,
            &config.raw_url,
            config.github_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn user_agent() -> String {
        format!("gitstack/{}", crate::VERSION)
    }

    fn api_get(&self, url: &str) -> RequestBuilder {
        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, Self::user_agent());

        if let Some(token) = &self.token {
            request = request
                .header(AUTHORIZATION, format!("Bearer {}", token))
                .header("X-GitHub-Api-Version", API_VERSION);
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!(url, "GET");
        let response = self.api_get(url).send().await?;
        let response = check_status(response, url)?;
        response.json::<T>().await.map_err(|e| SourceError::Decode {
            message: e.to_string(),
        })
    }

    async fn default_branch(&self, repo: &RepoRef) -> Result<String, SourceError> {
        if let Some(branch) = &repo.default_branch {
            return Ok(branch.clone());
        }
        let url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name);
        let metadata: RepoMetadata = self.get_json(&url).await?;
        Ok(metadata.default_branch)
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    header_value(headers, "x-ratelimit-reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Maps HTTP failures onto [`SourceError`] and logs quota headers
fn check_status(response: Response, url: &str) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        if let (Some(remaining), Some(limit)) = (
            header_value(response.headers(), "x-ratelimit-remaining"),
            header_value(response.headers(), "x-ratelimit-limit"),
        ) {
            debug!(remaining, limit, "Rate limit status");
        }
        return Ok(response);
    }

    let headers = response.headers();
    let exhausted = header_value(headers, "x-ratelimit-remaining") == Some("0");
    if exhausted && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS) {
        let reset = rate_limit_reset(headers);
        warn!(
            reset = ?reset,
            "Rate limit exhausted; set GITSTACK_GITHUB_TOKEN to raise the quota"
        );
        return Err(SourceError::RateLimited { reset });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            what: url.to_string(),
        });
    }

    Err(SourceError::Status {
        code: status.as_u16(),
        url: url.to_string(),
    })
}

#[async_trait]
impl RepositoryDataSource for GitHubSource {
    fn name(&self) -> &str {
        "github"
    }

    async fn tree(&self, repo: &RepoRef) -> Result<Vec<String>, SourceError> {
        let branch = self.default_branch(repo).await?;
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_url, repo.owner, repo.name, branch
        );
        let response: TreeResponse = self.get_json(&url).await?;

        if response.truncated {
            warn!(repo = %repo, entries = response.tree.len(), "Tree listing truncated by host");
        }

        Ok(response
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob" || entry.kind == "tree")
            .map(|entry| entry.path)
            .collect())
    }

    async fn file_content(&self, repo: &RepoRef, path: &str) -> Result<String, SourceError> {
        let url = format!("{}/{}/{}/HEAD/{}", self.raw_url, repo.owner, repo.name, path);
        debug!(url = %url, "GET raw");

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, Self::user_agent())
            .send()
            .await?;
        let response = check_status(response, &url)?;
        Ok(response.text().await?)
    }

    async fn account_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, SourceError> {
        let mut repos = Vec::new();

        for page in 1..=MAX_REPO_PAGES {
            let url = format!(
                "{}/users/{}/repos?per_page={}&page={}&sort=updated",
                self.api_url, account, REPOS_PER_PAGE, page
            );
            let batch: Vec<RepoDto> = match self.get_json(&url).await {
                Ok(batch) => batch,
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!(account, page, fetched = repos.len(), error = %e, "Repository listing cut short");
                    break;
                }
            };
            let count = batch.len();
            repos.extend(batch.into_iter().map(RepoSummary::from));

            if count < REPOS_PER_PAGE {
                break;
            }
        }

        debug!(account, repos = repos.len(), "Listed account repositories");
        Ok(repos)
    }
}
