use crate::pipeline::context::{ScanContext, ScanState};
use crate::pipeline::phase_trait::ScanPhase;
use crate::stack::SignatureRegistry;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct DependencyPhase {
    registry: Arc<SignatureRegistry>,
}

impl DependencyPhase {
    pub fn new(registry: Arc<SignatureRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ScanPhase for DependencyPhase {
    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn state(&self, _context: &ScanContext) -> ScanState {
        ScanState::MatchingDependencies
    }

    fn applies(&self, context: &ScanContext) -> bool {
        context.options.fetch_manifests
    }

    async fn execute(&self, context: &mut ScanContext) -> Result<()> {
        let before = context.detected.len();
        self.registry
            .detect_dependencies(&context.dependencies, &mut context.detected);
        debug!(
            repo = %context.repo,
            added = context.detected.len() - before,
            "Dependency rules evaluated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::dependencies::Manifest;
    use crate::detection::types::FileSet;
    use crate::pipeline::context::ScanOptions;
    use crate::source::RepoRef;
    use serde_json::json;

    #[tokio::test]
    async fn test_adds_dependency_detections() {
        let mut ctx = ScanContext::new(RepoRef::new("a", "b"), FileSet::new(), ScanOptions::default());
        ctx.dependencies
            .absorb(Manifest::Structured(json!({"dependencies": {"react": "^18"}})));

        DependencyPhase::new(Arc::new(SignatureRegistry::with_defaults()))
            .execute(&mut ctx)
            .await
            .unwrap();

        assert!(ctx.detected.contains("React"));
    }
}
