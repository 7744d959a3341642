//! Terminal progress bar driven by progress events

use super::{ProgressEvent, ProgressHandler};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}";

/// Renders percentage events on stderr. Drawing is hidden when stderr is not a terminal.
pub struct ProgressBarHandler {
    bar: ProgressBar,
}

impl ProgressBarHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        if !atty::is(atty::Stream::Stderr) {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { bar }
    }

    pub fn hidden() -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(100);
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Default for ProgressBarHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressHandler for ProgressBarHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { target } => {
                self.bar.set_position(0);
                self.bar.set_message(format!("Scanning {}", target));
            }
            ProgressEvent::Progress { percent, label } => {
                self.bar.set_position(u64::from(*percent));
                self.bar.set_message(label.clone());
            }
            ProgressEvent::RepositoryScanned {
                repo, index, total, ..
            } => {
                if *total > 0 {
                    self.bar.set_position((*index as u64 * 100) / *total as u64);
                }
                self.bar.set_message(format!("Scanned {} ({}/{})", repo, index, total));
            }
            ProgressEvent::Completed { .. } => {
                self.bar.finish_and_clear();
            }
            ProgressEvent::PhaseStarted { .. }
            | ProgressEvent::PhaseComplete { .. }
            | ProgressEvent::PhaseFailed { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_bar_tracks_percent_and_label() {
        let handler = ProgressBarHandler::hidden();
        handler.on_progress(&ProgressEvent::progress(60, "Reading manifests"));
        assert_eq!(handler.position(), 60);
        assert_eq!(handler.message(), "Reading manifests");
    }

    #[test]
    fn test_bar_tracks_repository_batches() {
        let handler = ProgressBarHandler::hidden();
        handler.on_progress(&ProgressEvent::RepositoryScanned {
            repo: "a/b".to_string(),
            index: 3,
            total: 4,
            technologies: 2,
        });
        assert_eq!(handler.position(), 75);
    }

    #[test]
    fn test_bar_finishes_on_completion() {
        let handler = ProgressBarHandler::hidden();
        handler.on_progress(&ProgressEvent::Completed {
            technologies: 0,
            partial: false,
            total_time: Duration::ZERO,
        });
        assert!(handler.is_finished());
    }
}
