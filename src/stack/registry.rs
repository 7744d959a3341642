use super::signature::TechSignature;
use super::signatures;
use crate::detection::dependencies::DependencySet;
use crate::detection::matcher;
use crate::detection::types::{DetectedSet, FileSet};
use std::collections::HashSet;
use tracing::debug;

/// Ordered collection of technology signatures.
///
/// Signature names are unique; registering a name twice keeps the first entry.
pub struct SignatureRegistry {
    signatures: Vec<TechSignature>,
    names: HashSet<&'static str>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self {
            signatures: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for sig in signatures::builtin() {
            registry.register(*sig);
        }
        registry
    }

    pub fn from_signatures<I>(sigs: I) -> Self
    where
        I: IntoIterator<Item = TechSignature>,
    {
        let mut registry = Self::new();
        for sig in sigs {
            registry.register(sig);
        }
        registry
    }

    /// Returns false when a signature with the same name was already registered
    pub fn register(&mut self, signature: TechSignature) -> bool {
        if !self.names.insert(signature.name) {
            debug!(name = signature.name, "Ignoring duplicate signature");
            return false;
        }
        self.signatures.push(signature);
        true
    }

    pub fn all(&self) -> &[TechSignature] {
        &self.signatures
    }

    pub fn get(&self, name: &str) -> Option<&TechSignature> {
        self.signatures.iter().find(|sig| sig.name == name)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Adds every signature whose file or extension rules match the given paths
    pub fn detect_paths(&self, files: &FileSet, detected: &mut DetectedSet) {
        let paths = files.as_slice();
        for sig in &self.signatures {
            if detected.contains(sig.name) {
                continue;
            }
            if matcher::matches_paths(sig, paths) {
                detected.insert(sig.name);
            }
        }
    }

    /// Adds every signature not yet detected whose dependency rules match
    pub fn detect_dependencies(&self, dependencies: &DependencySet, detected: &mut DetectedSet) {
        if dependencies.is_empty() {
            return;
        }
        for sig in &self.signatures {
            if detected.contains(sig.name) {
                continue;
            }
            if matcher::matches_dependencies(sig, dependencies) {
                detected.insert(sig.name);
            }
        }
    }

    /// Runs both rule families in one pass and returns the detected names
    pub fn detect(&self, files: &FileSet, dependencies: &DependencySet) -> DetectedSet {
        let mut detected = DetectedSet::new();
        self.detect_paths(files, &mut detected);
        self.detect_dependencies(dependencies, &mut detected);
        detected
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
