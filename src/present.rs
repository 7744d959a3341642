//! Presentation layer interface
//!
//! The engine hands finished views to a [`StackPresenter`]; rendering is entirely the
//! presenter's business. [`RecordingPresenter`] keeps every call for inspection.

use crate::source::RepoRef;
use crate::stack::{group_by_category, CategoryGroup};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum StackTarget {
    Repository(String),
    Account(String),
}

impl StackTarget {
    pub fn repository(repo: &RepoRef) -> Self {
        StackTarget::Repository(repo.slug())
    }

    pub fn account(name: impl Into<String>) -> Self {
        StackTarget::Account(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            StackTarget::Repository(name) | StackTarget::Account(name) => name,
        }
    }
}

impl fmt::Display for StackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackTarget::Repository(name) => write!(f, "repository {}", name),
            StackTarget::Account(name) => write!(f, "account {}", name),
        }
    }
}

/// Detected stack ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackView {
    pub target: StackTarget,
    pub technologies: Vec<String>,
    /// More data could change the result: shallow scan, or unscanned repositories remain
    pub is_partial: bool,
    /// Repositories folded into an account view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_count: Option<usize>,
}

impl StackView {
    pub fn repository(repo: &RepoRef, technologies: Vec<String>, is_partial: bool) -> Self {
        Self {
            target: StackTarget::repository(repo),
            technologies,
            is_partial,
            repo_count: None,
        }
    }

    pub fn account(name: &str, technologies: Vec<String>, repo_count: usize, is_partial: bool) -> Self {
        Self {
            target: StackTarget::account(name),
            technologies,
            is_partial,
            repo_count: Some(repo_count),
        }
    }

    pub fn groups(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.technologies)
    }
}

pub trait StackPresenter: Send + Sync {
    fn show_stack(&self, view: &StackView);

    /// Nothing was detected after looking at `scanned` repositories
    fn show_empty(&self, target: &StackTarget, scanned: usize);

    /// The account could not be examined at all because the quota is exhausted
    fn show_rate_limited(&self, target: &StackTarget, reset: Option<DateTime<Utc>>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Stack(StackView),
    Empty { target: StackTarget, scanned: usize },
    RateLimited { target: StackTarget, reset: Option<DateTime<Utc>> },
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<Presentation>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Presentation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Presentation> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }

    pub fn stacks(&self) -> Vec<StackView> {
        self.calls()
            .into_iter()
            .filter_map(|p| match p {
                Presentation::Stack(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    fn push(&self, presentation: Presentation) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(presentation);
        }
    }
}

impl StackPresenter for RecordingPresenter {
    fn show_stack(&self, view: &StackView) {
        self.push(Presentation::Stack(view.clone()));
    }

    fn show_empty(&self, target: &StackTarget, scanned: usize) {
        self.push(Presentation::Empty {
            target: target.clone(),
            scanned,
        });
    }

    fn show_rate_limited(&self, target: &StackTarget, reset: Option<DateTime<Utc>>) {
        self.push(Presentation::RateLimited {
            target: target.clone(),
            reset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Category;

    #[test]
    fn test_view_groups_by_category() {
        let view = StackView::repository(
            &RepoRef::new("a", "b"),
            vec!["Docker".to_string(), "React".to_string()],
            false,
        );
        let groups = view.groups();
        assert_eq!(groups[0].category, Category::Framework);
        assert_eq!(groups[1].category, Category::DevOps);
    }

    #[test]
    fn test_target_serialization() {
        let json = serde_json::to_value(StackTarget::account("octo")).unwrap();
        assert_eq!(json["kind"], "account");
        assert_eq!(json["name"], "octo");
    }

    #[test]
    fn test_recording_presenter() {
        let presenter = RecordingPresenter::new();
        let target = StackTarget::account("octo");
        presenter.show_empty(&target, 3);
        presenter.show_rate_limited(&target, None);

        assert_eq!(presenter.calls().len(), 2);
        assert!(matches!(presenter.last(), Some(Presentation::RateLimited { .. })));
        assert!(presenter.stacks().is_empty());
    }
}
