//! Core data types shared by the matcher and the scan pipeline

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository-relative paths examined during one scan. Order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
    }
}

/// Completeness of the evidence a scan ran against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Full recursive tree of the default branch
    Deep,
    /// Only the file names visible on the current page
    Shallow,
    /// Full tree without manifest dependencies, as sampled for accounts
    Quick,
}

impl ScanMode {
    pub fn is_partial(&self) -> bool {
        matches!(self, ScanMode::Shallow | ScanMode::Quick)
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Deep => f.write_str("deep"),
            ScanMode::Shallow => f.write_str("shallow"),
            ScanMode::Quick => f.write_str("quick"),
        }
    }
}

/// Names detected during a scan, deduplicated and kept in detection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedSet {
    names: IndexSet<String>,
}

impl DetectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name, returning false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}

impl<S: Into<String>> Extend<S> for DetectedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.names.insert(name.into());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for DetectedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DetectedSet::new();
        set.extend(iter);
        set
    }
}

/// Persisted outcome of a scan. Records are replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub technologies: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Number of repositories folded into an account aggregate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_count: Option<usize>,
    /// Evidence completeness of the scan that produced a repository record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ScanMode>,
}

impl ScanResult {
    pub fn new(technologies: Vec<String>) -> Self {
        Self {
            technologies,
            timestamp: Utc::now(),
            repo_count: None,
            mode: None,
        }
    }

    pub fn aggregate(technologies: Vec<String>, repo_count: usize) -> Self {
        Self {
            technologies,
            timestamp: Utc::now(),
            repo_count: Some(repo_count),
            mode: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn is_partial(&self) -> bool {
        self.mode.is_some_and(|m| m.is_partial())
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}
