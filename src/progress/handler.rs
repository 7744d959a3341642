//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while scanning a repository or an account
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Scan of a repository or account started
    Started { target: String },

    /// Coarse progress for display: percentage and a human-readable phase label
    Progress { percent: u8, label: String },

    PhaseStarted { phase: String },

    PhaseComplete { phase: String, duration: Duration },

    /// A phase failed; the scan continues with degraded input
    PhaseFailed { phase: String, error: String },

    /// One repository of an account sample has been scanned
    RepositoryScanned {
        repo: String,
        index: usize,
        total: usize,
        technologies: usize,
    },

    Completed {
        technologies: usize,
        partial: bool,
        total_time: Duration,
    },
}

impl ProgressEvent {
    pub fn progress(percent: u8, label: impl Into<String>) -> Self {
        ProgressEvent::Progress {
            percent: percent.min(100),
            label: label.into(),
        }
    }
}

pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
