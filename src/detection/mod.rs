//! File, extension and dependency matching
//!
//! Everything in this module is pure: matching takes paths and dependency sets and
//! returns detections without touching the network or the cache.

pub mod dependencies;
pub mod manifests;
pub mod matcher;
pub mod types;

pub use dependencies::{DependencyField, DependencySet, Manifest, DEPENDENCY_FIELDS};
pub use manifests::{discover_manifests, ALTERNATE_MANIFESTS, MAX_PRIMARY_MANIFESTS, PRIMARY_MANIFEST};
pub use types::{DetectedSet, FileSet, ScanMode, ScanResult};
