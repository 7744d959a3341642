//! Persistent keyed storage for scan results
//!
//! Each key maps to one whole record. Every write goes to its own temporary file in the
//! store directory and is then renamed over the record, so concurrent writers race to
//! last-writer-wins without ever leaving a half-written file behind.

use crate::detection::types::ScanResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub trait ResultStore: Send + Sync {
    /// Loads a record. Unreadable or corrupt records are reported as `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<ScanResult>>;

    fn save(&self, key: &str, result: &ScanResult) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    key: String,
    #[serde(flatten)]
    result: ScanResult,
}

/// One JSON file per key, named by the SHA-256 of the key
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }
}

impl ResultStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<ScanResult>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache record {}", path.display()))?;

        match serde_json::from_str::<StoredRecord>(&content) {
            Ok(record) if record.key == key => Ok(Some(record.result)),
            Ok(record) => {
                warn!(key, stored_key = %record.key, "Cache record key mismatch, ignoring");
                Ok(None)
            }
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "Corrupt cache record, treating as miss");
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, result: &ScanResult) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory {}", self.dir.display()))?;

        let record = StoredRecord {
            key: key.to_string(),
            result: result.clone(),
        };
        let json = serde_json::to_vec_pretty(&record).context("Failed to serialize cache record")?;

        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(&json)
            .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(key, path = %path.display(), "Cache record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Process-local store, used when persistence is disabled and in tests
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, ScanResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<ScanResult>> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, result: &ScanResult) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        records.insert(key.to_string(), result.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        records.remove(key);
        Ok(())
    }
}
