//! Repository sampling for account aggregation

use crate::source::RepoSummary;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Repositories taken from each ranking signal
pub const SAMPLE_PER_SIGNAL: usize = 5;

/// Repositories scanned per "scan more" request
pub const SCAN_MORE_BATCH: usize = 10;

/// Top `per_signal` repositories by stars, then top `per_signal` by last push, deduplicated
/// by full name.
///
/// Ties keep listing order. Repositories that were never pushed rank last by recency. The
/// sample never exceeds `2 * per_signal` entries or the number of candidates.
pub fn select_sample(candidates: &[RepoSummary], per_signal: usize) -> Vec<RepoSummary> {
    let mut by_stars: Vec<&RepoSummary> = candidates.iter().collect();
    by_stars.sort_by_key(|repo| Reverse(repo.stargazers_count));

    let mut by_recency: Vec<&RepoSummary> = candidates.iter().collect();
    by_recency.sort_by_key(|repo| Reverse(repo.pushed_at));

    let mut seen = HashSet::new();
    by_stars
        .into_iter()
        .take(per_signal)
        .chain(by_recency.into_iter().take(per_signal))
        .filter(|repo| seen.insert(repo.full_name()))
        .cloned()
        .collect()
}

/// Next batch of uncached repositories, in listing order
pub fn next_batch(candidates: &[RepoSummary], batch: usize) -> Vec<RepoSummary> {
    candidates.iter().take(batch).cloned().collect()
}
