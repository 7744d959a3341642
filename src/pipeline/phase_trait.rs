use super::context::{ScanContext, ScanState};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ScanPhase: Send + Sync {
    fn name(&self) -> &'static str;

    /// State the scan enters when this phase starts
    fn state(&self, context: &ScanContext) -> ScanState;

    /// Whether the phase applies to this scan at all
    fn applies(&self, _context: &ScanContext) -> bool {
        true
    }

    async fn execute(&self, context: &mut ScanContext) -> Result<()>;
}
