//! Scan pipeline
//!
//! A scan walks the states `Idle → FetchingTree → DeepScan | ShallowScan →
//! FetchingManifests → MatchingDependencies → Done`. Each state is handled by one
//! [`ScanPhase`]; the [`ScanOrchestrator`] runs them in order and never aborts early.

pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;

pub use context::{ScanContext, ScanOptions, ScanState};
pub use orchestrator::{ScanOrchestrator, ScanReport};
pub use phase_trait::ScanPhase;
