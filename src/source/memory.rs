//! In-memory data source for tests and offline use
//!
//! Serves canned trees, files and account listings, counts every call, and records
//! which repositories had their tree requested.

use super::{RepoRef, RepoSummary, RepositoryDataSource, SourceError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySource {
    trees: HashMap<String, Result<Vec<String>, SourceError>>,
    files: HashMap<(String, String), String>,
    accounts: HashMap<String, Result<Vec<RepoSummary>, SourceError>>,
    tree_calls: AtomicUsize,
    file_calls: AtomicUsize,
    account_calls: AtomicUsize,
    tree_requests: Mutex<Vec<String>>,
}

fn key(repo: &RepoRef) -> String {
    repo.slug().to_lowercase()
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree<I, S>(mut self, slug: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trees.insert(
            slug.to_lowercase(),
            Ok(paths.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Makes tree requests for `slug` fail with `error`
    pub fn with_tree_error(mut self, slug: &str, error: SourceError) -> Self {
        self.trees.insert(slug.to_lowercase(), Err(error));
        self
    }

    pub fn with_file(mut self, slug: &str, path: &str, content: impl Into<String>) -> Self {
        self.files
            .insert((slug.to_lowercase(), path.to_string()), content.into());
        self
    }

    pub fn with_account(mut self, account: &str, repos: Vec<RepoSummary>) -> Self {
        self.accounts.insert(account.to_lowercase(), Ok(repos));
        self
    }

    pub fn with_account_error(mut self, account: &str, error: SourceError) -> Self {
        self.accounts.insert(account.to_lowercase(), Err(error));
        self
    }

    pub fn tree_calls(&self) -> usize {
        self.tree_calls.load(Ordering::SeqCst)
    }

    pub fn file_calls(&self) -> usize {
        self.file_calls.load(Ordering::SeqCst)
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    /// Slugs whose tree was requested, in request order
    pub fn tree_requests(&self) -> Vec<String> {
        self.tree_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RepositoryDataSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn tree(&self, repo: &RepoRef) -> Result<Vec<String>, SourceError> {
        self.tree_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.tree_requests.lock() {
            requests.push(key(repo));
        }

        match self.trees.get(&key(repo)) {
            Some(result) => result.clone(),
            None => Err(SourceError::NotFound { what: repo.slug() }),
        }
    }

    async fn file_content(&self, repo: &RepoRef, path: &str) -> Result<String, SourceError> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(&(key(repo), path.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                what: format!("{}/{}", repo.slug(), path),
            })
    }

    async fn account_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, SourceError> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        match self.accounts.get(&account.to_lowercase()) {
            Some(result) => result.clone(),
            None => Err(SourceError::NotFound {
                what: account.to_string(),
            }),
        }
    }
}
