use super::context::{ScanContext, ScanOptions, ScanState};
use super::phase_trait::ScanPhase;
use super::phases::{DependencyPhase, FileScanPhase, ManifestPhase, TreePhase};
use crate::cache::{repo_key, ScanCache, TtlCache};
use crate::detection::types::{FileSet, ScanMode, ScanResult};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::source::{RepoRef, RepositoryDataSource};
use crate::stack::SignatureRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one repository scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub repo: String,
    pub technologies: Vec<String>,
    pub mode: ScanMode,
    /// True when detection ran against the visible file names only
    pub partial: bool,
    pub timestamp: DateTime<Utc>,
    /// Whether the result was written to the persistent cache
    #[serde(skip)]
    pub cached: bool,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}

/// Drives one scan through the fixed phase sequence.
///
/// Phase failures are logged and the scan continues with whatever input is left, so a
/// scan always reaches [`ScanState::Done`].
pub struct ScanOrchestrator {
    source: Arc<dyn RepositoryDataSource>,
    registry: Arc<SignatureRegistry>,
    cache: Arc<ScanCache>,
    tree_cache: TtlCache<Vec<String>>,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl ScanOrchestrator {
    pub fn new(
        source: Arc<dyn RepositoryDataSource>,
        registry: Arc<SignatureRegistry>,
        cache: Arc<ScanCache>,
    ) -> Self {
        let tree_cache = TtlCache::new(cache.policy().tree);
        Self {
            source,
            registry,
            cache,
            tree_cache,
            progress_handler: None,
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = Some(handler);
        self
    }

    pub fn source(&self) -> &Arc<dyn RepositoryDataSource> {
        &self.source
    }

    pub fn cache(&self) -> &Arc<ScanCache> {
        &self.cache
    }

    pub fn registry(&self) -> &Arc<SignatureRegistry> {
        &self.registry
    }

    pub fn progress_handler(&self) -> Option<&Arc<dyn ProgressHandler>> {
        self.progress_handler.as_ref()
    }

    fn phases(&self) -> Vec<Box<dyn ScanPhase>> {
        vec![
            Box::new(TreePhase::new(self.source.clone(), self.tree_cache.clone())),
            Box::new(FileScanPhase::new(self.registry.clone())),
            Box::new(ManifestPhase::new(self.source.clone())),
            Box::new(DependencyPhase::new(self.registry.clone())),
        ]
    }

    fn emit(&self, options: &ScanOptions, event: ProgressEvent) {
        let Some(handler) = &self.progress_handler else {
            return;
        };
        let is_percent = matches!(event, ProgressEvent::Progress { .. });
        if is_percent && !options.report_progress {
            return;
        }
        handler.on_progress(&event);
    }

    pub async fn scan(&self, repo: &RepoRef, visible_files: &[String], options: ScanOptions) -> ScanReport {
        let start = Instant::now();
        let mut context = ScanContext::new(
            repo.clone(),
            FileSet::from_paths(visible_files.iter().cloned()),
            options,
        );

        info!(repo = %repo, manifests = options.fetch_manifests, "Starting scan");
        self.emit(
            &options,
            ProgressEvent::Started {
                target: repo.slug(),
            },
        );

        for phase in self.phases() {
            if !phase.applies(&context) {
                debug!(phase = phase.name(), "Phase skipped");
                continue;
            }

            context.state = phase.state(&context);
            if let Some((percent, label)) = progress_for(&context) {
                self.emit(&options, ProgressEvent::progress(percent, label));
            }
            self.emit(
                &options,
                ProgressEvent::PhaseStarted {
                    phase: phase.name().to_string(),
                },
            );

            let phase_start = Instant::now();
            match phase.execute(&mut context).await {
                Ok(()) => self.emit(
                    &options,
                    ProgressEvent::PhaseComplete {
                        phase: phase.name().to_string(),
                        duration: phase_start.elapsed(),
                    },
                ),
                Err(e) => {
                    warn!(repo = %repo, phase = phase.name(), error = %format!("{:#}", e), "Phase failed, continuing");
                    self.emit(
                        &options,
                        ProgressEvent::PhaseFailed {
                            phase: phase.name().to_string(),
                            error: format!("{:#}", e),
                        },
                    );
                }
            }
        }

        context.state = ScanState::Done;
        let mode = context.mode.unwrap_or(ScanMode::Shallow);
        let technologies = context.detected.into_vec();
        let result = ScanResult::new(technologies.clone()).with_mode(mode);

        let cached = if options.write_cache {
            self.cache.record(&repo_key(&repo.owner, &repo.name), &result)
        } else {
            false
        };

        self.emit(
            &options,
            ProgressEvent::progress(100, format!("Found {} technologies!", technologies.len())),
        );
        self.emit(
            &options,
            ProgressEvent::Completed {
                technologies: technologies.len(),
                partial: mode.is_partial(),
                total_time: start.elapsed(),
            },
        );

        info!(
            repo = %repo,
            mode = %mode,
            technologies = technologies.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Scan complete"
        );

        ScanReport {
            repo: repo.slug(),
            technologies,
            mode,
            partial: mode.is_partial(),
            timestamp: result.timestamp,
            cached,
        }
    }

    /// Full scan with page-visible file names as the shallow fallback
    pub async fn scan_repository(&self, repo: &RepoRef, visible_files: &[String]) -> ScanReport {
        self.scan(repo, visible_files, ScanOptions::default()).await
    }

    /// Tree-only scan used when sampling an account's repositories
    pub async fn quick_scan(&self, repo: &RepoRef) -> ScanReport {
        self.scan(repo, &[], ScanOptions::quick()).await
    }
}

/// Percentage and label shown when a state is entered
fn progress_for(context: &ScanContext) -> Option<(u8, String)> {
    match context.state {
        ScanState::FetchingTree => Some((20, "Fetching file tree...".to_string())),
        ScanState::DeepScan => {
            let count = context.tree.as_ref().map(FileSet::len).unwrap_or(0);
            Some((40, format!("Found {} files...", count)))
        }
        ScanState::ShallowScan => Some((40, "Found 0 files...".to_string())),
        ScanState::FetchingManifests => Some((60, "Fetching package files...".to_string())),
        ScanState::MatchingDependencies => Some((80, "Analyzing dependencies...".to_string())),
        ScanState::Idle | ScanState::Done => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlPolicy;
    use crate::source::{MemorySource, SourceError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    impl RecordingHandler {
        fn percents(&self) -> Vec<u8> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    ProgressEvent::Progress { percent, .. } => Some(*percent),
                    _ => None,
                })
                .collect()
        }
    }

    fn orchestrator(source: MemorySource) -> (ScanOrchestrator, Arc<MemorySource>) {
        let source = Arc::new(source);
        let orchestrator = ScanOrchestrator::new(
            source.clone(),
            Arc::new(SignatureRegistry::with_defaults()),
            Arc::new(ScanCache::in_memory(TtlPolicy::default())),
        );
        (orchestrator, source)
    }

    #[tokio::test]
    async fn test_deep_scan_with_dependencies() {
        let (orch, _) = orchestrator(
            MemorySource::new()
                .with_tree("a/b", ["src/index.ts", "package.json"])
                .with_file("a/b", "package.json", r#"{"dependencies":{"react":"^18"}}"#),
        );

        let report = orch.scan_repository(&RepoRef::new("a", "b"), &[]).await;
        assert_eq!(report.mode, ScanMode::Deep);
        assert!(!report.partial);
        assert!(report.technologies.contains(&"TypeScript".to_string()));
        assert!(report.technologies.contains(&"React".to_string()));
        assert!(report.cached);
    }

    #[tokio::test]
    async fn test_failed_tree_falls_back_to_visible_files() {
        let (orch, source) = orchestrator(
            MemorySource::new().with_tree_error("a/b", SourceError::RateLimited { reset: None }),
        );

        let report = orch
            .scan_repository(&RepoRef::new("a", "b"), &["Dockerfile".to_string()])
            .await;
        assert_eq!(report.mode, ScanMode::Shallow);
        assert!(report.partial);
        assert_eq!(report.technologies, vec!["Docker"]);
        assert_eq!(source.file_calls(), 1 + crate::detection::ALTERNATE_MANIFESTS.len());
    }

    #[tokio::test]
    async fn test_quick_scan_fetches_no_manifests() {
        let (orch, source) = orchestrator(MemorySource::new().with_tree("a/b", ["Cargo.toml", "src/lib.rs"]));

        let report = orch.quick_scan(&RepoRef::new("a", "b")).await;
        assert_eq!(report.technologies, vec!["Rust"]);
        assert_eq!(source.file_calls(), 0);
        assert_eq!(report.mode, ScanMode::Quick);
        assert_eq!(
            orch.cache().peek(&repo_key("a", "b")).unwrap().mode,
            Some(ScanMode::Quick)
        );
    }

    #[tokio::test]
    async fn test_empty_result_is_not_cached() {
        let (orch, _) = orchestrator(MemorySource::new().with_tree("a/b", ["NOTES"]));
        let report = orch.scan_repository(&RepoRef::new("a", "b"), &[]).await;

        assert!(report.is_empty());
        assert!(!report.cached);
        assert!(orch.cache().peek(&repo_key("a", "b")).is_none());
    }

    #[tokio::test]
    async fn test_progress_sequence() {
        let handler = Arc::new(RecordingHandler::default());
        let (orch, _) = orchestrator(MemorySource::new().with_tree("a/b", ["Dockerfile"]));
        let orch = orch.with_progress(handler.clone());

        orch.scan_repository(&RepoRef::new("a", "b"), &[]).await;
        assert_eq!(handler.percents(), vec![20, 40, 60, 80, 100]);
    }

    #[tokio::test]
    async fn test_background_scan_reports_no_percentages() {
        let handler = Arc::new(RecordingHandler::default());
        let (orch, _) = orchestrator(MemorySource::new().with_tree("a/b", ["Dockerfile"]));
        let orch = orch.with_progress(handler.clone());

        orch.scan(&RepoRef::new("a", "b"), &[], ScanOptions::background()).await;
        assert!(handler.percents().is_empty());
    }
}
