//! Repository data sources
//!
//! A [`RepositoryDataSource`] supplies file listings, raw file contents and account
//! repository listings. The scan pipeline treats every error it returns as non-fatal.

pub mod github;
pub mod local;
pub mod memory;

pub use github::GitHubSource;
pub use local::LocalSource;
pub use memory::MemorySource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Unexpected HTTP status {code} for {url}")]
    Status { code: u16, url: String },

    #[error("Rate limit exhausted{}", reset_suffix(.reset))]
    RateLimited { reset: Option<DateTime<Utc>> },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

fn reset_suffix(reset: &Option<DateTime<Utc>>) -> String {
    reset.map(|r| format!(" until {}", r)).unwrap_or_default()
}

impl SourceError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SourceError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Decode {
                message: e.to_string(),
            }
        } else {
            SourceError::Network {
                message: e.to_string(),
            }
        }
    }
}

/// Identifies one repository on the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    /// Default branch when already known, saving a metadata request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            default_branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    /// Parses `owner/repo`, tolerating surrounding slashes and a trailing `.git`
    pub fn parse(slug: &str) -> Option<Self> {
        let trimmed = slug.trim().trim_matches('/');
        let (owner, name) = trimmed.split_once('/')?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Account repository listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub owner: String,
    pub default_branch: String,
    pub stargazers_count: u64,
    /// Last push; absent for repositories that were never pushed to
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepoSummary {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.owner, &self.name).with_branch(&self.default_branch)
    }
}

#[async_trait]
pub trait RepositoryDataSource: Send + Sync {
    fn name(&self) -> &str;

    /// Full recursive path listing of the default branch
    async fn tree(&self, repo: &RepoRef) -> Result<Vec<String>, SourceError>;

    /// Raw content of one file at the head of the default branch
    async fn file_content(&self, repo: &RepoRef, path: &str) -> Result<String, SourceError>;

    async fn account_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, SourceError>;
}
