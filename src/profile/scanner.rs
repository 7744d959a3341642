use super::sampler::{next_batch, select_sample, SAMPLE_PER_SIGNAL, SCAN_MORE_BATCH};
use crate::cache::{profile_key, repo_key, TtlClass};
use crate::detection::types::{DetectedSet, ScanResult};
use crate::pipeline::ScanOrchestrator;
use crate::present::{StackPresenter, StackTarget, StackView};
use crate::progress::ProgressEvent;
use crate::source::{RepoSummary, SourceError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How an account scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    /// Technologies found; see [`ProfileReport::is_partial`]
    Found,
    /// Repositories were examined and nothing was detected
    Empty,
    /// The account listing was refused by the host quota
    RateLimited,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub account: String,
    pub status: ProfileStatus,
    pub technologies: Vec<String>,
    /// Repositories contributing to the aggregate, cached ones included
    pub repo_count: usize,
    /// Uncached repositories not yet scanned
    pub remaining: usize,
    /// Served from a fresh account aggregate without listing repositories
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_reset: Option<DateTime<Utc>>,
    /// Full names scanned during this session
    pub scanned: Vec<String>,
    #[serde(skip)]
    repositories: Vec<RepoSummary>,
}

impl ProfileReport {
    fn new(account: &str, status: ProfileStatus) -> Self {
        Self {
            account: account.to_string(),
            status,
            technologies: Vec::new(),
            repo_count: 0,
            remaining: 0,
            from_cache: false,
            rate_limit_reset: None,
            scanned: Vec::new(),
            repositories: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.remaining > 0
    }

    /// Whether a follow-up `scan_more` could add anything
    pub fn can_scan_more(&self) -> bool {
        self.status != ProfileStatus::RateLimited && self.remaining > 0
    }
}

/// Union of cached per-repository results and the repositories still lacking one
struct Partition {
    technologies: DetectedSet,
    cached: usize,
    uncached: Vec<RepoSummary>,
}

/// Aggregates an account's stack from per-repository quick scans.
///
/// Repositories are scanned strictly one at a time with a fixed delay between requests.
pub struct ProfileScanner {
    orchestrator: Arc<ScanOrchestrator>,
    delay: Duration,
}

impl ProfileScanner {
    pub fn new(orchestrator: Arc<ScanOrchestrator>, delay: Duration) -> Self {
        Self {
            orchestrator,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn scan(&self, account: &str, presenter: &dyn StackPresenter) -> ProfileReport {
        let target = StackTarget::account(account);

        if let Some(cached) = self.orchestrator.cache().profile(account) {
            if !cached.result.is_empty() {
                let repo_count = cached.result.repo_count.unwrap_or(0);
                debug!(account, repo_count, "Serving cached account aggregate");
                presenter.show_stack(&StackView::account(
                    account,
                    cached.result.technologies.clone(),
                    repo_count,
                    false,
                ));
                let mut report = ProfileReport::new(account, ProfileStatus::Found);
                report.technologies = cached.result.technologies;
                report.repo_count = repo_count;
                report.from_cache = true;
                return report;
            }
        }

        let repositories = match self.orchestrator.source().account_repositories(account).await {
            Ok(repos) => repos,
            Err(SourceError::RateLimited { reset }) => {
                warn!(account, "Rate limit exhausted, cannot list repositories");
                presenter.show_rate_limited(&target, reset);
                let mut report = ProfileReport::new(account, ProfileStatus::RateLimited);
                report.rate_limit_reset = reset;
                return report;
            }
            Err(e) => {
                warn!(account, error = %e, "Failed to list repositories");
                Vec::new()
            }
        };

        if repositories.is_empty() {
            presenter.show_empty(&target, 0);
            return ProfileReport::new(account, ProfileStatus::Empty);
        }

        let Partition {
            mut technologies,
            cached,
            uncached,
        } = self.partition(&repositories, &HashSet::new());
        info!(
            account,
            repositories = repositories.len(),
            cached,
            uncached = uncached.len(),
            "Aggregating account stack"
        );

        if !technologies.is_empty() {
            presenter.show_stack(&StackView::account(
                account,
                technologies.iter().map(String::from).collect(),
                cached,
                !uncached.is_empty(),
            ));
        }

        let sample = select_sample(&uncached, SAMPLE_PER_SIGNAL);
        let remaining = uncached.len() - sample.len();
        let mut repo_count = cached;
        let mut scanned = Vec::with_capacity(sample.len());

        if !sample.is_empty() {
            self.emit(ProgressEvent::Started {
                target: account.to_string(),
            });
            let start = Instant::now();

            for (index, summary) in sample.iter().enumerate() {
                if index > 0 {
                    tokio::time::sleep(self.delay).await;
                }
                let found = self.scan_one(summary, index, sample.len()).await;
                technologies.extend(found);
                repo_count += 1;
                scanned.push(summary.full_name());

                if !technologies.is_empty() {
                    presenter.show_stack(&StackView::account(
                        account,
                        technologies.iter().map(String::from).collect(),
                        repo_count,
                        remaining > 0,
                    ));
                }
            }

            self.emit(ProgressEvent::Completed {
                technologies: technologies.len(),
                partial: remaining > 0,
                total_time: start.elapsed(),
            });
            self.persist(account, &technologies, repo_count);
        }

        if technologies.is_empty() {
            presenter.show_empty(&target, repo_count);
        }

        self.report(account, technologies, repo_count, remaining, scanned, repositories)
    }

    /// Scans the next batch of uncached repositories left over by `previous`.
    ///
    /// Repositories scanned earlier in the session are skipped even when their scan found
    /// nothing and so left no per-repository record.
    pub async fn scan_more(&self, previous: &ProfileReport, presenter: &dyn StackPresenter) -> ProfileReport {
        let account = previous.account.as_str();
        let target = StackTarget::account(account);

        let repositories = if previous.repositories.is_empty() {
            match self.orchestrator.source().account_repositories(account).await {
                Ok(repos) => repos,
                Err(SourceError::RateLimited { reset }) => {
                    presenter.show_rate_limited(&target, reset);
                    let mut report = previous.clone();
                    report.status = ProfileStatus::RateLimited;
                    report.rate_limit_reset = reset;
                    return report;
                }
                Err(e) => {
                    warn!(account, error = %e, "Failed to list repositories");
                    Vec::new()
                }
            }
        } else {
            previous.repositories.clone()
        };

        let already: HashSet<String> = previous.scanned.iter().cloned().collect();
        let Partition {
            technologies: cached_technologies,
            uncached,
            ..
        } = self.partition(&repositories, &already);

        let mut technologies: DetectedSet = previous.technologies.iter().cloned().collect();
        technologies.extend(cached_technologies.into_vec());

        let batch = next_batch(&uncached, SCAN_MORE_BATCH);
        let remaining = uncached.len() - batch.len();
        let mut repo_count = previous.repo_count;
        let mut scanned = previous.scanned.clone();

        info!(account, batch = batch.len(), remaining, "Scanning more repositories");
        for (index, summary) in batch.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.delay).await;
            }
            technologies.extend(self.scan_one(summary, index, batch.len()).await);
            repo_count += 1;
            scanned.push(summary.full_name());
        }

        if !batch.is_empty() {
            self.persist(account, &technologies, repo_count);
        }

        if technologies.is_empty() {
            presenter.show_empty(&target, repo_count);
        } else {
            presenter.show_stack(&StackView::account(
                account,
                technologies.iter().map(String::from).collect(),
                repo_count,
                remaining > 0,
            ));
        }

        self.report(account, technologies, repo_count, remaining, scanned, repositories)
    }

    /// Splits repositories into those with a record fresh under the account TTL and the rest.
    fn partition(&self, repositories: &[RepoSummary], exclude: &HashSet<String>) -> Partition {
        let cache = self.orchestrator.cache();
        let mut technologies = DetectedSet::new();
        let mut cached = 0;
        let mut uncached = Vec::new();

        for summary in repositories {
            if exclude.contains(&summary.full_name()) {
                continue;
            }
            match cache.lookup(&repo_key(&summary.owner, &summary.name), TtlClass::Profile) {
                Some(record) => {
                    cached += 1;
                    technologies.extend(record.result.technologies);
                }
                None => uncached.push(summary.clone()),
            }
        }

        Partition {
            technologies,
            cached,
            uncached,
        }
    }

    async fn scan_one(&self, summary: &RepoSummary, index: usize, total: usize) -> Vec<String> {
        let report = self.orchestrator.quick_scan(&summary.repo_ref()).await;
        debug!(
            repo = %summary.full_name(),
            technologies = report.technologies.len(),
            "Sampled repository scanned"
        );
        self.emit(ProgressEvent::RepositoryScanned {
            repo: summary.full_name(),
            index: index + 1,
            total,
            technologies: report.technologies.len(),
        });
        report.technologies
    }

    fn persist(&self, account: &str, technologies: &DetectedSet, repo_count: usize) {
        let aggregate = ScanResult::aggregate(technologies.iter().map(String::from).collect(), repo_count);
        self.orchestrator.cache().record(&profile_key(account), &aggregate);
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = self.orchestrator.progress_handler() {
            handler.on_progress(&event);
        }
    }

    fn report(
        &self,
        account: &str,
        technologies: DetectedSet,
        repo_count: usize,
        remaining: usize,
        scanned: Vec<String>,
        repositories: Vec<RepoSummary>,
    ) -> ProfileReport {
        let status = if technologies.is_empty() {
            ProfileStatus::Empty
        } else {
            ProfileStatus::Found
        };
        let mut report = ProfileReport::new(account, status);
        report.technologies = technologies.into_vec();
        report.repo_count = repo_count;
        report.remaining = remaining;
        report.scanned = scanned;
        report.repositories = repositories;
        report
    }
}
