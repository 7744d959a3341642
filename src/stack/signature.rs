//! Technology signatures
//!
//! A signature names one technology and the rules that reveal it in a repository: exact
//! file names or path fragments, filename suffixes, and dependency names declared in
//! package manifests. Signatures are plain `'static` data so the built-in tables can be
//! declared as constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive classification of a signature. Never consulted while matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Framework,
    Language,
    Tool,
    Infrastructure,
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignatureKind::Framework => "framework",
            SignatureKind::Language => "language",
            SignatureKind::Tool => "tool",
            SignatureKind::Infrastructure => "infrastructure",
        };
        f.write_str(s)
    }
}

/// Detection rules for a single technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechSignature {
    /// Display name, also the key used for caching and categorization
    pub name: &'static str,
    pub kind: SignatureKind,
    /// Exact file names (`Dockerfile`) or path fragments (`.github/workflows`)
    pub files: &'static [&'static str],
    /// Literal path suffixes (`.rs`, `.d.ts`)
    pub extensions: &'static [&'static str],
    /// Dependency keys that imply this technology
    pub dependencies: &'static [&'static str],
}

impl TechSignature {
    pub const fn new(name: &'static str, kind: SignatureKind) -> Self {
        Self {
            name,
            kind,
            files: &[],
            extensions: &[],
            dependencies: &[],
        }
    }

    pub const fn framework(name: &'static str) -> Self {
        Self::new(name, SignatureKind::Framework)
    }

    pub const fn language(name: &'static str) -> Self {
        Self::new(name, SignatureKind::Language)
    }

    pub const fn tool(name: &'static str) -> Self {
        Self::new(name, SignatureKind::Tool)
    }

    pub const fn infrastructure(name: &'static str) -> Self {
        Self::new(name, SignatureKind::Infrastructure)
    }

    pub const fn files(self, files: &'static [&'static str]) -> Self {
        Self { files, ..self }
    }

    pub const fn extensions(self, extensions: &'static [&'static str]) -> Self {
        Self { extensions, ..self }
    }

    pub const fn dependencies(self, dependencies: &'static [&'static str]) -> Self {
        Self {
            dependencies,
            ..self
        }
    }

    /// True if the signature can ever match. A signature without rules is a table defect.
    pub fn has_rules(&self) -> bool {
        !self.files.is_empty() || !self.extensions.is_empty() || !self.dependencies.is_empty()
    }

    /// True if any file or extension rule is declared
    pub fn has_path_rules(&self) -> bool {
        !self.files.is_empty() || !self.extensions.is_empty()
    }
}
