//! Per-scan state threaded through the pipeline phases

use crate::detection::dependencies::DependencySet;
use crate::detection::types::{DetectedSet, FileSet, ScanMode};
use crate::source::RepoRef;
use std::fmt;

/// Scan state machine. Every scan reaches [`ScanState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    FetchingTree,
    DeepScan,
    ShallowScan,
    FetchingManifests,
    MatchingDependencies,
    Done,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScanState::Idle => "idle",
            ScanState::FetchingTree => "fetching_tree",
            ScanState::DeepScan => "deep_scan",
            ScanState::ShallowScan => "shallow_scan",
            ScanState::FetchingManifests => "fetching_manifests",
            ScanState::MatchingDependencies => "matching_dependencies",
            ScanState::Done => "done",
        };
        f.write_str(s)
    }
}

/// Knobs distinguishing a full scan from the tree-only quick scan used for accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Fetch manifests and match dependency rules
    pub fetch_manifests: bool,
    /// Match visible file names when the tree is unavailable
    pub shallow_fallback: bool,
    /// Emit percentage progress events
    pub report_progress: bool,
    /// Persist the result under the repository key
    pub write_cache: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            fetch_manifests: true,
            shallow_fallback: true,
            report_progress: true,
            write_cache: true,
        }
    }
}

impl ScanOptions {
    /// Tree-only deep scan: no manifests and no shallow fallback
    pub fn quick() -> Self {
        Self {
            fetch_manifests: false,
            shallow_fallback: false,
            report_progress: false,
            write_cache: true,
        }
    }

    /// Full scan without progress reporting
    pub fn background() -> Self {
        Self {
            report_progress: false,
            ..Self::default()
        }
    }
}

pub struct ScanContext {
    pub repo: RepoRef,
    pub options: ScanOptions,
    pub state: ScanState,

    /// File names visible on the current page, used by the shallow fallback
    pub visible_files: FileSet,

    /// Full listing; `None` until fetched, empty when the fetch failed
    pub tree: Option<FileSet>,
    pub mode: Option<ScanMode>,
    pub dependencies: DependencySet,
    pub detected: DetectedSet,

    /// Manifest fetches that failed, by path
    pub failed_manifests: Vec<String>,
}

impl ScanContext {
    pub fn new(repo: RepoRef, visible_files: FileSet, options: ScanOptions) -> Self {
        Self {
            repo,
            options,
            state: ScanState::Idle,
            visible_files,
            tree: None,
            mode: None,
            dependencies: DependencySet::new(),
            detected: DetectedSet::new(),
            failed_manifests: Vec::new(),
        }
    }

    pub fn has_tree(&self) -> bool {
        self.tree.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn tree_paths(&self) -> Option<&[String]> {
        self.tree.as_ref().filter(|t| !t.is_empty()).map(FileSet::as_slice)
    }

    pub fn is_partial(&self) -> bool {
        self.mode.map(|m| m.is_partial()).unwrap_or(true)
    }
}
