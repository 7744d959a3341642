//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { target } => {
                info!(scan_target = %target, "Starting stack scan");
            }
            ProgressEvent::Progress { percent, label } => {
                debug!(percent, label = %label, "Scan progress");
            }
            ProgressEvent::PhaseStarted { phase } => {
                debug!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                debug!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::PhaseFailed { phase, error } => {
                warn!(phase = %phase, error = %error, "Phase failed, continuing degraded");
            }
            ProgressEvent::RepositoryScanned {
                repo,
                index,
                total,
                technologies,
            } => {
                info!(
                    repo = %repo,
                    progress = format!("{}/{}", index, total),
                    technologies,
                    "Repository scanned"
                );
            }
            ProgressEvent::Completed {
                technologies,
                partial,
                total_time,
            } => {
                info!(
                    technologies,
                    partial,
                    total_time_ms = total_time.as_millis(),
                    "Stack scan complete"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                target: "a/b".to_string(),
            },
            ProgressEvent::progress(40, "Files found"),
            ProgressEvent::PhaseStarted {
                phase: "tree".to_string(),
            },
            ProgressEvent::PhaseComplete {
                phase: "tree".to_string(),
                duration: Duration::from_millis(10),
            },
            ProgressEvent::PhaseFailed {
                phase: "manifests".to_string(),
                error: "timeout".to_string(),
            },
            ProgressEvent::RepositoryScanned {
                repo: "a/b".to_string(),
                index: 1,
                total: 10,
                technologies: 4,
            },
            ProgressEvent::Completed {
                technologies: 4,
                partial: true,
                total_time: Duration::from_secs(1),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
