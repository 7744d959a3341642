//! Local checkout data source
//!
//! Serves a directory on disk through the same interface as a hosted repository, so a
//! checkout can be scanned with the identical pipeline. The walk honours `.gitignore`.

use super::{RepoRef, RepoSummary, RepositoryDataSource, SourceError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "target", "dist", "build", ".venv", "vendor"];
const DEFAULT_MAX_DEPTH: usize = 12;
const DEFAULT_MAX_ENTRIES: usize = 50_000;

pub struct LocalSource {
    root: PathBuf,
    max_depth: usize,
    max_entries: usize,
}

impl LocalSource {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root
            .as_ref()
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", root.as_ref().display()))?;
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }
        debug!(root = %root.display(), "LocalSource initialized");

        Ok(Self {
            root,
            max_depth: DEFAULT_MAX_DEPTH,
            max_entries: DEFAULT_MAX_ENTRIES,
        })
    }

    pub fn with_limits(mut self, max_depth: usize, max_entries: usize) -> Self {
        self.max_depth = max_depth;
        self.max_entries = max_entries;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repository reference named after the directory
    pub fn repo_ref(&self) -> RepoRef {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        RepoRef::new("local", name)
    }

    fn walk(root: &Path, max_depth: usize, max_entries: usize) -> Vec<String> {
        let mut overrides = OverrideBuilder::new(root);
        for dir in EXCLUDED_DIRS {
            if let Err(e) = overrides.add(&format!("!{}/", dir)) {
                warn!(dir, error = %e, "Invalid exclusion pattern");
            }
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .max_depth(Some(max_depth))
            .hidden(false)
            .git_ignore(true)
            .require_git(false);
        match overrides.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => warn!(error = %e, "Failed to build walk overrides"),
        }

        let mut paths = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            if paths.len() >= max_entries {
                warn!(max_entries, "Local walk reached entry limit, listing truncated");
                break;
            }
            paths.push(to_slash_path(relative));
        }
        paths
    }
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_contained(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[async_trait]
impl RepositoryDataSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn tree(&self, _repo: &RepoRef) -> Result<Vec<String>, SourceError> {
        let root = self.root.clone();
        let (max_depth, max_entries) = (self.max_depth, self.max_entries);

        tokio::task::spawn_blocking(move || Self::walk(&root, max_depth, max_entries))
            .await
            .map_err(|e| SourceError::Network {
                message: format!("Directory walk failed: {}", e),
            })
    }

    async fn file_content(&self, _repo: &RepoRef, path: &str) -> Result<String, SourceError> {
        if !is_contained(path) {
            return Err(SourceError::NotFound {
                what: path.to_string(),
            });
        }

        let full = self.root.join(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SourceError::NotFound {
                what: path.to_string(),
            }),
            Err(e) => Err(SourceError::Decode {
                message: format!("{}: {}", full.display(), e),
            }),
        }
    }

    async fn account_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, SourceError> {
        Err(SourceError::NotFound {
            what: format!("account listing for '{}' on a local checkout", account),
        })
    }
}
