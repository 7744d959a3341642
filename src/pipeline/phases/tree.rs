use crate::cache::TtlCache;
use crate::detection::types::FileSet;
use crate::pipeline::context::{ScanContext, ScanState};
use crate::pipeline::phase_trait::ScanPhase;
use crate::source::RepositoryDataSource;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Acquires the full listing, from the in-process memo when possible.
///
/// A failed fetch leaves an empty listing behind so later phases take the degraded path.
pub struct TreePhase {
    source: Arc<dyn RepositoryDataSource>,
    tree_cache: TtlCache<Vec<String>>,
}

impl TreePhase {
    pub fn new(source: Arc<dyn RepositoryDataSource>, tree_cache: TtlCache<Vec<String>>) -> Self {
        Self { source, tree_cache }
    }
}

#[async_trait]
impl ScanPhase for TreePhase {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn state(&self, _context: &ScanContext) -> ScanState {
        ScanState::FetchingTree
    }

    async fn execute(&self, context: &mut ScanContext) -> Result<()> {
        let key = context.repo.slug().to_lowercase();

        if let Some(paths) = self.tree_cache.get(&key) {
            debug!(repo = %context.repo, paths = paths.len(), "Tree served from memo");
            context.tree = Some(FileSet::from_paths(paths));
            return Ok(());
        }

        match self.source.tree(&context.repo).await {
            Ok(paths) => {
                debug!(repo = %context.repo, paths = paths.len(), source = self.source.name(), "Tree fetched");
                if !paths.is_empty() {
                    self.tree_cache.insert(key, paths.clone());
                }
                context.tree = Some(FileSet::from_paths(paths));
                Ok(())
            }
            Err(e) => {
                context.tree = Some(FileSet::new());
                Err(anyhow::Error::new(e).context(format!("Tree fetch failed for {}", context.repo)))
            }
        }
    }
}
