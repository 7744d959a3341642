//! Page-context dispatch
//!
//! The host raises a [`ContextEvent`] whenever the viewed page changes. [`StackSession`]
//! parses the path into a [`PageContext`] and runs the repository or account flow against
//! its presenter.

use crate::cache::ScanCache;
use crate::pipeline::{ScanOptions, ScanOrchestrator, ScanReport};
use crate::present::{StackPresenter, StackView};
use crate::profile::{ProfileReport, ProfileScanner};
use crate::source::RepoRef;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Delay between the final progress update and presenting a foreground result
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// First path segments that are site pages rather than repository owners
pub const REPOSITORY_RESERVED_PATHS: &[&str] = &[
    "settings", "notifications", "organizations", "orgs", "search", "marketplace", "explore",
    "topics", "trending", "collections", "events", "sponsors", "about", "pricing", "features",
    "enterprise", "team", "security", "customer-stories", "readme", "new", "codespaces",
    "discussions", "users", "login", "signup", "join", "pulls", "issues", "stars", "watching",
    "repositories", "projects", "packages", "people",
];

/// Single path segments that are site pages rather than accounts
pub const PROFILE_RESERVED_PATHS: &[&str] = &[
    "explore", "topics", "trending", "collections", "events", "sponsors", "about", "pricing",
    "features", "enterprise", "team", "security", "customer-stories", "readme", "new",
    "organizations", "settings", "notifications", "pulls", "issues", "marketplace", "apps",
    "codespaces", "discussions", "orgs", "users", "search", "login", "signup", "join", "stars",
    "watching", "repositories",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContext {
    Repository(RepoRef),
    Profile(String),
    Other,
}

impl PageContext {
    /// Classifies a site path such as `/owner/repo/tree/main` or `/user?tab=repositories`.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        match parts.as_slice() {
            [owner, repo, ..] => {
                if REPOSITORY_RESERVED_PATHS.contains(&owner.to_lowercase().as_str()) {
                    PageContext::Other
                } else {
                    PageContext::Repository(RepoRef::new(*owner, *repo))
                }
            }
            [user] => {
                if PROFILE_RESERVED_PATHS.contains(&user.to_lowercase().as_str()) || user.starts_with('.') {
                    PageContext::Other
                } else {
                    PageContext::Profile(user.to_string())
                }
            }
            [] => PageContext::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextEvent {
    /// The viewed page changed. `visible_files` are the names shown in the page's listing.
    Changed {
        path: String,
        visible_files: Vec<String>,
    },
    /// The user asked for more repositories of the current account
    ScanMore,
}

impl ContextEvent {
    pub fn changed(path: impl Into<String>) -> Self {
        ContextEvent::Changed {
            path: path.into(),
            visible_files: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct RepositoryOutcome {
    pub repo: RepoRef,
    pub technologies: Vec<String>,
    pub partial: bool,
    pub from_cache: bool,
    /// Background rescan started because the cached record was due for a refresh
    pub refresh: Option<JoinHandle<ScanReport>>,
}

#[derive(Debug)]
pub enum SessionOutcome {
    Ignored,
    Repository(RepositoryOutcome),
    Profile(ProfileReport),
}

pub struct StackSession {
    orchestrator: Arc<ScanOrchestrator>,
    profiles: ProfileScanner,
    presenter: Arc<dyn StackPresenter>,
    settle_delay: Duration,
    last_path: Mutex<Option<String>>,
    last_profile: Mutex<Option<ProfileReport>>,
}

impl StackSession {
    pub fn new(
        orchestrator: Arc<ScanOrchestrator>,
        presenter: Arc<dyn StackPresenter>,
        profile_delay: Duration,
    ) -> Self {
        Self {
            profiles: ProfileScanner::new(orchestrator.clone(), profile_delay),
            orchestrator,
            presenter,
            settle_delay: SETTLE_DELAY,
            last_path: Mutex::new(None),
            last_profile: Mutex::new(None),
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn cache(&self) -> &Arc<ScanCache> {
        self.orchestrator.cache()
    }

    /// Handles a host event. A `Changed` event for the path already shown is ignored.
    pub async fn handle(&self, event: ContextEvent) -> SessionOutcome {
        match event {
            ContextEvent::Changed {
                path,
                visible_files,
            } => {
                if !self.remember_path(&path) {
                    debug!(path = %path, "Context unchanged");
                    return SessionOutcome::Ignored;
                }
                match PageContext::from_path(&path) {
                    PageContext::Repository(repo) => {
                        SessionOutcome::Repository(self.show_repository(&repo, &visible_files).await)
                    }
                    PageContext::Profile(user) => SessionOutcome::Profile(self.show_profile(&user).await),
                    PageContext::Other => SessionOutcome::Ignored,
                }
            }
            ContextEvent::ScanMore => {
                let previous = self.last_profile.lock().ok().and_then(|p| p.clone());
                match previous {
                    Some(previous) if previous.can_scan_more() => {
                        let report = self.profiles.scan_more(&previous, self.presenter.as_ref()).await;
                        self.store_profile(&report);
                        SessionOutcome::Profile(report)
                    }
                    _ => SessionOutcome::Ignored,
                }
            }
        }
    }

    /// Cache-first repository flow.
    ///
    /// A fresh non-empty record is shown at once; a background rescan is spawned when it
    /// passed the refresh threshold or came from a shallow or quick scan. Otherwise a foreground
    /// scan runs and its result is shown if anything was found.
    pub async fn show_repository(&self, repo: &RepoRef, visible_files: &[String]) -> RepositoryOutcome {
        if let Some(cached) = self.orchestrator.cache().repo(&repo.owner, &repo.name) {
            if !cached.result.is_empty() {
                let partial = cached.result.is_partial();
                info!(repo = %repo, technologies = cached.result.technologies.len(), "Showing cached stack");
                self.presenter.show_stack(&StackView::repository(
                    repo,
                    cached.result.technologies.clone(),
                    partial,
                ));

                let refresh = (cached.needs_refresh() || partial)
                    .then(|| self.spawn_refresh(repo.clone(), visible_files.to_vec()));
                return RepositoryOutcome {
                    repo: repo.clone(),
                    technologies: cached.result.technologies,
                    partial,
                    from_cache: true,
                    refresh,
                };
            }
        }

        let report = self
            .orchestrator
            .scan(repo, visible_files, ScanOptions::default())
            .await;
        tokio::time::sleep(self.settle_delay).await;

        if !report.is_empty() {
            self.presenter.show_stack(&StackView::repository(
                repo,
                report.technologies.clone(),
                report.partial,
            ));
        }

        RepositoryOutcome {
            repo: repo.clone(),
            technologies: report.technologies,
            partial: report.partial,
            from_cache: false,
            refresh: None,
        }
    }

    pub async fn show_profile(&self, user: &str) -> ProfileReport {
        let report = self.profiles.scan(user, self.presenter.as_ref()).await;
        self.store_profile(&report);
        report
    }

    fn spawn_refresh(&self, repo: RepoRef, visible_files: Vec<String>) -> JoinHandle<ScanReport> {
        debug!(repo = %repo, "Background refresh triggered");
        let orchestrator = self.orchestrator.clone();
        let presenter = self.presenter.clone();
        tokio::spawn(async move {
            let report = orchestrator
                .scan(&repo, &visible_files, ScanOptions::background())
                .await;
            if !report.is_empty() {
                presenter.show_stack(&StackView::repository(
                    &repo,
                    report.technologies.clone(),
                    report.partial,
                ));
            }
            report
        })
    }

    fn remember_path(&self, path: &str) -> bool {
        let Ok(mut last) = self.last_path.lock() else {
            return true;
        };
        if last.as_deref() == Some(path) {
            return false;
        }
        *last = Some(path.to_string());
        true
    }

    fn store_profile(&self, report: &ProfileReport) {
        if let Ok(mut last) = self.last_profile.lock() {
            *last = Some(report.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{repo_key, TtlPolicy};
    use crate::detection::types::{ScanMode, ScanResult};
    use crate::present::RecordingPresenter;
    use crate::source::MemorySource;
    use crate::stack::SignatureRegistry;
    use chrono::{Duration as ChronoDuration, Utc};
    use yare::parameterized;

    #[parameterized(
        repo_root = { "/octo/app", Some(("octo", "app")) },
        repo_subpage = { "/octo/app/tree/main/src", Some(("octo", "app")) },
        reserved_owner = { "/settings/profile", None },
        reserved_owner_case = { "/Marketplace/actions", None },
        profile = { "/octo", None },
        root = { "/", None },
    )]
    fn test_repository_context(path: &str, expected: Option<(&str, &str)>) {
        let parsed = match PageContext::from_path(path) {
            PageContext::Repository(repo) => Some((repo.owner, repo.name)),
            _ => None,
        };
        assert_eq!(
            parsed,
            expected.map(|(o, r)| (o.to_string(), r.to_string()))
        );
    }

    #[parameterized(
        user = { "/octo", Some("octo") },
        user_with_query = { "/octo?tab=repositories", Some("octo") },
        reserved = { "/explore", None },
        reserved_case = { "/Trending", None },
        apps_is_profile_reserved = { "/apps", None },
        dotted = { "/.github", None },
    )]
    fn test_profile_context(path: &str, expected: Option<&str>) {
        let parsed = match PageContext::from_path(path) {
            PageContext::Profile(user) => Some(user),
            _ => None,
        };
        assert_eq!(parsed.as_deref(), expected);
    }

    fn session(source: MemorySource) -> (StackSession, Arc<RecordingPresenter>, Arc<MemorySource>) {
        let source = Arc::new(source);
        let orchestrator = Arc::new(ScanOrchestrator::new(
            source.clone(),
            Arc::new(SignatureRegistry::with_defaults()),
            Arc::new(ScanCache::in_memory(TtlPolicy::default())),
        ));
        let presenter = Arc::new(RecordingPresenter::new());
        let session = StackSession::new(orchestrator, presenter.clone(), Duration::ZERO)
            .with_settle_delay(Duration::ZERO);
        (session, presenter, source)
    }

    #[tokio::test]
    async fn test_fresh_cache_is_shown_without_scanning() {
        let (session, presenter, source) = session(MemorySource::new());
        session.cache().put(
            &repo_key("octo", "app"),
            &ScanResult::new(vec!["Go".to_string()]).with_mode(ScanMode::Deep),
        );

        let outcome = session.show_repository(&RepoRef::new("octo", "app"), &[]).await;
        assert!(outcome.from_cache);
        assert!(outcome.refresh.is_none());
        assert_eq!(source.tree_calls(), 0);
        assert_eq!(presenter.stacks()[0].technologies, vec!["Go"]);
    }

    #[tokio::test]
    async fn test_aging_cache_spawns_background_refresh() {
        let (session, presenter, source) = session(MemorySource::new().with_tree("octo/app", ["go.mod"]));
        let aged = ScanResult::new(vec!["Rust".to_string()])
            .with_mode(ScanMode::Deep)
            .with_timestamp(Utc::now() - ChronoDuration::seconds(300));
        session.cache().put(&repo_key("octo", "app"), &aged);

        let outcome = session.show_repository(&RepoRef::new("octo", "app"), &[]).await;
        assert_eq!(outcome.technologies, vec!["Rust"]);
        let refreshed = outcome.refresh.expect("refresh spawned").await.unwrap();

        assert_eq!(refreshed.technologies, vec!["Go"]);
        assert_eq!(source.tree_calls(), 1);
        assert_eq!(presenter.stacks().len(), 2);
        assert_eq!(
            session.cache().peek(&repo_key("octo", "app")).unwrap().technologies,
            vec!["Go"]
        );
    }

    #[tokio::test]
    async fn test_quick_scanned_record_is_refreshed_at_once() {
        let (session, presenter, source) = session(
            MemorySource::new()
                .with_tree("octo/app", ["package.json", "tsconfig.json"])
                .with_file("octo/app", "package.json", r#"{"dependencies": {"react": "^18"}}"#),
        );
        let repo = RepoRef::new("octo", "app");
        session.orchestrator.quick_scan(&repo).await;
        assert_eq!(
            session.cache().peek(&repo_key("octo", "app")).unwrap().mode,
            Some(ScanMode::Quick)
        );

        let outcome = session.show_repository(&repo, &[]).await;
        assert!(outcome.from_cache);
        assert!(outcome.partial);
        assert!(!outcome.technologies.contains(&"React".to_string()));

        let refreshed = outcome.refresh.expect("refresh spawned").await.unwrap();
        assert_eq!(refreshed.mode, ScanMode::Deep);
        assert!(refreshed.technologies.contains(&"React".to_string()));
        assert!(source.file_calls() > 0);
        assert!(presenter.stacks()[0].is_partial);
        assert!(!presenter.stacks()[1].is_partial);
    }

    #[tokio::test]
    async fn test_empty_foreground_scan_presents_nothing() {
        let (session, presenter, _) = session(MemorySource::new().with_tree("octo/app", ["NOTES"]));
        let outcome = session.show_repository(&RepoRef::new("octo", "app"), &[]).await;

        assert!(!outcome.from_cache);
        assert!(outcome.technologies.is_empty());
        assert!(presenter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_context_is_ignored() {
        let (session, _, source) = session(MemorySource::new().with_tree("octo/app", ["Dockerfile"]));

        let first = session.handle(ContextEvent::changed("/octo/app")).await;
        assert!(matches!(first, SessionOutcome::Repository(_)));
        let second = session.handle(ContextEvent::changed("/octo/app")).await;
        assert!(matches!(second, SessionOutcome::Ignored));
        assert_eq!(source.tree_calls(), 1);
    }

    #[tokio::test]
    async fn test_other_pages_are_ignored() {
        let (session, presenter, _) = session(MemorySource::new());
        let outcome = session.handle(ContextEvent::changed("/settings/tokens")).await;
        assert!(matches!(outcome, SessionOutcome::Ignored));
        assert!(presenter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scan_more_without_profile_is_ignored() {
        let (session, _, _) = session(MemorySource::new());
        assert!(matches!(session.handle(ContextEvent::ScanMore).await, SessionOutcome::Ignored));
    }
}
