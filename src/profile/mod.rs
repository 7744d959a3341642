//! Account-level stack aggregation
//!
//! Fresh per-repository records are folded in directly. A bounded sample of the remaining
//! repositories is quick-scanned one at a time, and the union is stored as the account
//! aggregate.

pub mod sampler;
pub mod scanner;

pub use sampler::{next_batch, select_sample, SAMPLE_PER_SIGNAL, SCAN_MORE_BATCH};
pub use scanner::{ProfileReport, ProfileScanner, ProfileStatus};
