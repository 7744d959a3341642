//! TTL classes and freshness evaluation

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Kind of cached record, each with its own TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtlClass {
    Tree,
    Repo,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the soft threshold
    Fresh,
    /// Still within TTL but old enough that a background refresh should start
    NeedsRefresh,
    /// At or past TTL. Treated as absent.
    Stale,
}

impl Freshness {
    pub fn is_usable(&self) -> bool {
        !matches!(self, Freshness::Stale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub tree: Duration,
    pub repo: Duration,
    pub profile: Duration,
    /// Soft threshold, below every TTL it is compared against
    pub refresh_after: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            tree: Duration::from_secs(5 * 60),
            repo: Duration::from_secs(10 * 60),
            profile: Duration::from_secs(30 * 60),
            refresh_after: Duration::from_secs(2 * 60),
        }
    }
}

impl TtlPolicy {
    pub fn ttl(&self, class: TtlClass) -> Duration {
        match class {
            TtlClass::Tree => self.tree,
            TtlClass::Repo => self.repo,
            TtlClass::Profile => self.profile,
        }
    }

    pub fn freshness(&self, class: TtlClass, age: Duration) -> Freshness {
        if age >= self.ttl(class) {
            Freshness::Stale
        } else if age > self.refresh_after {
            Freshness::NeedsRefresh
        } else {
            Freshness::Fresh
        }
    }

    pub fn freshness_at(&self, class: TtlClass, written: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
        self.freshness(class, age_between(written, now))
    }

    pub fn is_fresh(&self, class: TtlClass, written: DateTime<Utc>) -> bool {
        self.freshness_at(class, written, Utc::now()).is_usable()
    }
}

/// Elapsed time between two instants. Timestamps in the future count as age zero.
pub fn age_between(written: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - written).to_std().unwrap_or(Duration::ZERO)
}
