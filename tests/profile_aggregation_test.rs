//! Account aggregation over an in-memory data source

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use gitstack::cache::repo_key;
use gitstack::present::{Presentation, RecordingPresenter};
use gitstack::source::MemorySource;
use gitstack::{
    ProfileScanner, ProfileStatus, RepoSummary, ScanCache, ScanOrchestrator, ScanResult,
    SignatureRegistry, SourceError, TtlPolicy,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn summary(name: &str, stars: u64, pushed_day: u32) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        owner: "octo".to_string(),
        default_branch: "main".to_string(),
        stargazers_count: stars,
        pushed_at: Some(Utc.with_ymd_and_hms(2024, 5, pushed_day, 12, 0, 0).unwrap()),
    }
}

fn setup(source: MemorySource) -> (ProfileScanner, Arc<ScanCache>, Arc<MemorySource>) {
    let source = Arc::new(source);
    let cache = Arc::new(ScanCache::in_memory(TtlPolicy::default()));
    let orchestrator = ScanOrchestrator::new(
        source.clone(),
        Arc::new(SignatureRegistry::with_defaults()),
        cache.clone(),
    );
    (
        ProfileScanner::new(Arc::new(orchestrator), Duration::ZERO),
        cache,
        source,
    )
}

/// Twelve repositories: three with fresh records, nine without.
///
/// Among the nine, the five most starred are u1..u5 and the five most recently pushed are
/// u1, u2, u3, u6, u7, so the deduplicated sample is u1..u7 and u8, u9 stay unscanned.
fn twelve_repositories() -> MemorySource {
    let mut repos = vec![
        summary("c1", 1000, 28),
        summary("c2", 900, 27),
        summary("c3", 800, 26),
    ];
    let uncached = [
        ("u1", 90, 20),
        ("u2", 80, 19),
        ("u3", 70, 18),
        ("u4", 60, 2),
        ("u5", 50, 3),
        ("u6", 10, 17),
        ("u7", 9, 16),
        ("u8", 8, 4),
        ("u9", 7, 5),
    ];
    repos.extend(uncached.iter().map(|(n, s, d)| summary(n, *s, *d)));

    let mut source = MemorySource::new().with_account("octo", repos);
    for (name, _, _) in uncached {
        source = source.with_tree(&format!("octo/{}", name), ["Dockerfile"]);
    }
    source
}

#[tokio::test]
async fn test_only_the_deduplicated_sample_is_scanned() {
    let (scanner, cache, source) = setup(twelve_repositories());
    for name in ["c1", "c2", "c3"] {
        cache.put(&repo_key("octo", name), &ScanResult::new(vec!["Go".to_string()]));
    }

    let presenter = RecordingPresenter::new();
    let report = scanner.scan("octo", &presenter).await;

    let scanned: HashSet<String> = source.tree_requests().into_iter().collect();
    let expected: HashSet<String> = ["u1", "u2", "u3", "u4", "u5", "u6", "u7"]
        .iter()
        .map(|n| format!("octo/{}", n))
        .collect();
    assert_eq!(scanned, expected);
    assert_eq!(source.tree_calls(), 7);

    assert_eq!(report.status, ProfileStatus::Found);
    assert_eq!(report.repo_count, 10);
    assert_eq!(report.remaining, 2);
    assert!(report.is_partial());
    assert_eq!(report.technologies, vec!["Go", "Docker"]);
}

#[tokio::test]
async fn test_cached_technologies_are_presented_first_as_partial() {
    let (scanner, cache, _) = setup(twelve_repositories());
    cache.put(&repo_key("octo", "c1"), &ScanResult::new(vec!["Go".to_string()]));

    let presenter = RecordingPresenter::new();
    scanner.scan("octo", &presenter).await;

    let stacks = presenter.stacks();
    assert_eq!(stacks[0].technologies, vec!["Go"]);
    assert!(stacks[0].is_partial);
    assert_eq!(stacks[0].repo_count, Some(1));
    // the sample is now c2, c3, u1, u2, u3 and each adds one view
    assert_eq!(stacks.len(), 1 + 5);
    assert!(stacks.iter().all(|view| view.is_partial));
}

#[tokio::test]
async fn test_records_older_than_profile_ttl_are_rescanned() {
    let source = MemorySource::new()
        .with_account("octo", vec![summary("old", 1, 1)])
        .with_tree("octo/old", ["go.mod"]);
    let (scanner, cache, source) = setup(source);
    let stale = ScanResult::new(vec!["Rust".to_string()])
        .with_timestamp(Utc::now() - ChronoDuration::hours(2));
    cache.put(&repo_key("octo", "old"), &stale);

    let report = scanner.scan("octo", &RecordingPresenter::new()).await;
    assert_eq!(source.tree_calls(), 1);
    assert_eq!(report.technologies, vec!["Go"]);
}

#[tokio::test]
async fn test_rate_limit_is_distinct_from_empty() {
    let (scanner, _, _) = setup(
        MemorySource::new().with_account_error("octo", SourceError::RateLimited { reset: None }),
    );
    let presenter = RecordingPresenter::new();
    let report = scanner.scan("octo", &presenter).await;

    assert_eq!(report.status, ProfileStatus::RateLimited);
    assert!(!report.can_scan_more());
    assert!(matches!(presenter.last(), Some(Presentation::RateLimited { .. })));
}

#[tokio::test]
async fn test_nothing_found_shows_empty_view() {
    let source = MemorySource::new()
        .with_account("octo", vec![summary("a", 1, 1), summary("b", 2, 2)])
        .with_tree("octo/a", ["NOTES"])
        .with_tree("octo/b", ["LICENSE"]);
    let (scanner, cache, _) = setup(source);

    let presenter = RecordingPresenter::new();
    let report = scanner.scan("octo", &presenter).await;

    assert_eq!(report.status, ProfileStatus::Empty);
    assert_eq!(
        presenter.last(),
        Some(Presentation::Empty {
            target: gitstack::StackTarget::account("octo"),
            scanned: 2
        })
    );
    // an empty aggregate is not persisted
    assert!(cache.profile("octo").is_none());
}
