//! gitstack - signature-based technology stack detection for hosted repositories
//!
//! A repository's file tree and dependency manifests are matched against a fixed table
//! of technology signatures. The result is cached per repository, aggregated per account,
//! and grouped into display categories.
//!
//! # Core Concepts
//!
//! - **Signatures**: named rule sets of file patterns, path suffixes and dependency names
//!   ([`stack`])
//! - **Scan pipeline**: tree fetch, deep or shallow file matching, manifest fetch and
//!   dependency matching, run by [`ScanOrchestrator`] ([`pipeline`])
//! - **Data sources**: where trees and file contents come from ([`source`])
//! - **Cache**: TTL-bounded tree memo and persistent scan records ([`cache`])
//! - **Profiles**: account-level aggregation over a sample of repositories ([`profile`])
//!
//! # Example Usage
//!
//! ```ignore
//! use gitstack::{GitHubSource, GitstackConfig, RepoRef, ScanCache, ScanOrchestrator, SignatureRegistry};
//! use std::sync::Arc;
//!
//! async fn detect() -> anyhow::Result<()> {
//!     let config = GitstackConfig::default();
//!     let orchestrator = ScanOrchestrator::new(
//!         Arc::new(GitHubSource::from_config(&config)?),
//!         Arc::new(SignatureRegistry::with_defaults()),
//!         Arc::new(ScanCache::from_config(&config)),
//!     );
//!
//!     let report = orchestrator
//!         .scan_repository(&RepoRef::new("rust-lang", "cargo"), &[])
//!         .await;
//!     println!("{:?}", report.technologies);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod detection;
pub mod pipeline;
pub mod present;
pub mod profile;
pub mod progress;
pub mod session;
pub mod source;
pub mod stack;
pub mod util;

pub use cache::{ScanCache, TtlPolicy};
pub use config::{ConfigError, GitstackConfig};
pub use detection::types::{DetectedSet, FileSet, ScanMode, ScanResult};
pub use pipeline::{ScanOptions, ScanOrchestrator, ScanReport};
pub use present::{StackPresenter, StackTarget, StackView};
pub use profile::{ProfileReport, ProfileScanner, ProfileStatus};
pub use progress::{ProgressEvent, ProgressHandler};
pub use session::{ContextEvent, PageContext, StackSession};
pub use source::{GitHubSource, LocalSource, RepoRef, RepoSummary, RepositoryDataSource, SourceError};
pub use stack::{categorize, group_by_category, Category, SignatureRegistry, TechSignature};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_gitstack() {
        assert_eq!(NAME, "gitstack");
    }
}
