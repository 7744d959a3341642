use crate::detection::types::ScanMode;
use crate::pipeline::context::{ScanContext, ScanState};
use crate::pipeline::phase_trait::ScanPhase;
use crate::stack::SignatureRegistry;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Evaluates file and extension rules against the full tree (deep) or, when the tree is
/// unavailable, against the visible file names (shallow)
pub struct FileScanPhase {
    registry: Arc<SignatureRegistry>,
}

impl FileScanPhase {
    pub fn new(registry: Arc<SignatureRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ScanPhase for FileScanPhase {
    fn name(&self) -> &'static str {
        "file_scan"
    }

    fn state(&self, context: &ScanContext) -> ScanState {
        if context.has_tree() {
            ScanState::DeepScan
        } else {
            ScanState::ShallowScan
        }
    }

    fn applies(&self, context: &ScanContext) -> bool {
        context.has_tree() || context.options.shallow_fallback
    }

    async fn execute(&self, context: &mut ScanContext) -> Result<()> {
        let before = context.detected.len();

        match &context.tree {
            Some(tree) if !tree.is_empty() => {
                context.mode = Some(if context.options.fetch_manifests {
                    ScanMode::Deep
                } else {
                    ScanMode::Quick
                });
                self.registry.detect_paths(tree, &mut context.detected);
                debug!(repo = %context.repo, paths = tree.len(), "Deep scan");
            }
            _ => {
                context.mode = Some(ScanMode::Shallow);
                info!(
                    repo = %context.repo,
                    visible = context.visible_files.len(),
                    "Tree unavailable, falling back to shallow scan"
                );
                self.registry
                    .detect_paths(&context.visible_files, &mut context.detected);
            }
        }

        debug!(
            detected = context.detected.len() - before,
            "File rules evaluated"
        );
        Ok(())
    }
}
