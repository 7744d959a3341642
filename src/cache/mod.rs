//! Time-boxed memoization of tree listings and scan results
//!
//! [`TtlCache`] holds tree listings in process. [`ScanCache`] wraps a persistent
//! [`ResultStore`] with the TTL policy; store failures are logged and degrade to misses.

pub mod memory;
pub mod policy;
pub mod store;

pub use memory::TtlCache;
pub use policy::{Freshness, TtlClass, TtlPolicy};
pub use store::{FileStore, MemoryStore, ResultStore};

use crate::config::GitstackConfig;
use crate::detection::types::ScanResult;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// A record read back together with its freshness under the requested TTL class
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    pub result: ScanResult,
    pub freshness: Freshness,
}

impl CachedResult {
    pub fn needs_refresh(&self) -> bool {
        self.freshness == Freshness::NeedsRefresh
    }
}

pub fn repo_key(owner: &str, repo: &str) -> String {
    format!("repo:{}/{}", owner.to_lowercase(), repo.to_lowercase())
}

pub fn profile_key(user: &str) -> String {
    format!("profile:{}", user.to_lowercase())
}

pub struct ScanCache {
    store: Arc<dyn ResultStore>,
    policy: TtlPolicy,
}

impl ScanCache {
    pub fn new(store: Arc<dyn ResultStore>, policy: TtlPolicy) -> Self {
        Self { store, policy }
    }

    pub fn in_memory(policy: TtlPolicy) -> Self {
        Self::new(Arc::new(MemoryStore::new()), policy)
    }

    /// File-backed when caching is enabled and a directory is known, in-memory otherwise
    pub fn from_config(config: &GitstackConfig) -> Self {
        match (&config.cache_dir, config.cache_enabled) {
            (Some(dir), true) => Self::new(Arc::new(FileStore::new(dir)), config.ttl_policy()),
            _ => Self::in_memory(config.ttl_policy()),
        }
    }

    pub fn policy(&self) -> &TtlPolicy {
        &self.policy
    }

    /// Raw record regardless of age
    pub fn peek(&self, key: &str) -> Option<ScanResult> {
        match self.store.load(key) {
            Ok(record) => record,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Record if still within the TTL of `class`
    pub fn lookup(&self, key: &str, class: TtlClass) -> Option<CachedResult> {
        let result = self.peek(key)?;
        let freshness = self.policy.freshness_at(class, result.timestamp, Utc::now());
        if !freshness.is_usable() {
            debug!(key, "Cache record expired");
            return None;
        }
        Some(CachedResult { result, freshness })
    }

    pub fn repo(&self, owner: &str, repo: &str) -> Option<CachedResult> {
        self.lookup(&repo_key(owner, repo), TtlClass::Repo)
    }

    pub fn profile(&self, user: &str) -> Option<CachedResult> {
        self.lookup(&profile_key(user), TtlClass::Profile)
    }

    /// Unconditional whole-record write. Failures are logged, never returned.
    pub fn put(&self, key: &str, result: &ScanResult) {
        if let Err(e) = self.store.save(key, result) {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    /// Writes a scan outcome, except an empty result for a key that has no record yet.
    ///
    /// Returns whether a write happened.
    pub fn record(&self, key: &str, result: &ScanResult) -> bool {
        if result.is_empty() && self.peek(key).is_none() {
            debug!(key, "Empty scan result with no prior record, skipping write");
            return false;
        }
        self.put(key, result);
        true
    }

    pub fn invalidate(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "Cache invalidation failed");
        }
    }
}
