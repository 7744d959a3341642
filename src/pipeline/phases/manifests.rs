use crate::detection::dependencies::Manifest;
use crate::detection::manifests::discover_manifests;
use crate::pipeline::context::{ScanContext, ScanState};
use crate::pipeline::phase_trait::ScanPhase;
use crate::source::{RepositoryDataSource, SourceError};
use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches candidate manifests concurrently and folds them into the dependency set.
///
/// Every fetch settles on its own; one failure never cancels the others.
pub struct ManifestPhase {
    source: Arc<dyn RepositoryDataSource>,
}

impl ManifestPhase {
    pub fn new(source: Arc<dyn RepositoryDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ScanPhase for ManifestPhase {
    fn name(&self) -> &'static str {
        "manifests"
    }

    fn state(&self, _context: &ScanContext) -> ScanState {
        ScanState::FetchingManifests
    }

    fn applies(&self, context: &ScanContext) -> bool {
        context.options.fetch_manifests
    }

    async fn execute(&self, context: &mut ScanContext) -> Result<()> {
        let paths = discover_manifests(context.tree_paths());
        let repo = &context.repo;
        let source = &self.source;

        let results = join_all(paths.iter().map(|path| async move {
            (path.as_str(), source.file_content(repo, path).await)
        }))
        .await;

        let mut fetched = 0;
        for (path, result) in results {
            match result {
                Ok(content) => {
                    fetched += 1;
                    if let Some(manifest) = Manifest::parse(path, content) {
                        context.dependencies.absorb(manifest);
                    }
                }
                Err(SourceError::NotFound { .. }) => {
                    context.failed_manifests.push(path.to_string());
                }
                Err(e) => {
                    warn!(path, error = %e, "Manifest fetch failed");
                    context.failed_manifests.push(path.to_string());
                }
            }
        }

        debug!(
            repo = %context.repo,
            requested = paths.len(),
            fetched,
            dependencies = context.dependencies.name_count(),
            text_manifests = context.dependencies.raw_text_count(),
            "Manifests aggregated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::types::FileSet;
    use crate::pipeline::context::ScanOptions;
    use crate::source::{MemorySource, RepoRef};

    #[tokio::test]
    async fn test_monorepo_manifests_merge() {
        let source = Arc::new(
            MemorySource::new()
                .with_file("a/b", "pkg-a/package.json", r#"{"dependencies":{"react":"18"}}"#)
                .with_file("a/b", "pkg-b/package.json", r#"{"devDependencies":{"vitest":"1"}}"#)
                .with_file("a/b", "go.mod", "require github.com/gin-gonic/gin v1.9.0"),
        );
        let mut ctx = ScanContext::new(RepoRef::new("a", "b"), FileSet::new(), ScanOptions::default());
        ctx.tree = Some(FileSet::from_paths(["pkg-a/package.json", "pkg-b/package.json", "go.mod"]));

        ManifestPhase::new(source.clone()).execute(&mut ctx).await.unwrap();

        assert!(ctx.dependencies.has_name("react"));
        assert!(ctx.dependencies.has_name("vitest"));
        assert!(ctx.dependencies.raw_text_contains("gin-gonic/gin"));
        assert_eq!(source.file_calls(), 2 + crate::detection::ALTERNATE_MANIFESTS.len());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let source = Arc::new(
            MemorySource::new()
                .with_file("a/b", "package.json", "{ broken")
                .with_file("a/b", "requirements.txt", "django==5.0"),
        );
        let mut ctx = ScanContext::new(RepoRef::new("a", "b"), FileSet::new(), ScanOptions::default());

        ManifestPhase::new(source).execute(&mut ctx).await.unwrap();

        assert!(ctx.dependencies.raw_text_contains("django"));
        assert_eq!(ctx.dependencies.name_count(), 0);
        assert!(ctx.failed_manifests.contains(&"Cargo.toml".to_string()));
    }
}
