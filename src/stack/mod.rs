//! Technology signatures and their registry
//!
//! The built-in tables live in [`signatures`]; [`SignatureRegistry`] owns the ordered set
//! consulted by a scan. Display grouping lives in [`category`] and is independent of
//! matching.

pub mod category;
pub mod registry;
pub mod signature;
pub mod signatures;

pub use category::{categorize, group_by_category, Category, CategoryGroup, CATEGORY_ORDER};
pub use registry::SignatureRegistry;
pub use signature::{SignatureKind, TechSignature};
