//! Scan phases, executed in order by the orchestrator

pub mod dependencies;
pub mod file_scan;
pub mod manifests;
pub mod tree;

pub use dependencies::DependencyPhase;
pub use file_scan::FileScanPhase;
pub use manifests::ManifestPhase;
pub use tree::TreePhase;
