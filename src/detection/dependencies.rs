//! Dependency aggregation across fetched manifests
//!
//! Structured (JSON) manifests contribute dependency keys through an ordered list of
//! field extractors. Any other manifest is kept as raw text and searched by substring,
//! which trades precision for coverage of ecosystems that are not parsed.

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// One dependency-bearing field of a structured manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyField {
    pub key: &'static str,
    pub ecosystem: &'static str,
}

impl DependencyField {
    /// Dependency names declared under this field, if the field is a map
    pub fn extract<'a>(&self, manifest: &'a Value) -> impl Iterator<Item = &'a str> + 'a {
        manifest
            .get(self.key)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|deps| deps.keys().map(String::as_str))
    }
}

pub const DEPENDENCY_FIELDS: &[DependencyField] = &[
    DependencyField {
        key: "dependencies",
        ecosystem: "npm",
    },
    DependencyField {
        key: "devDependencies",
        ecosystem: "npm",
    },
    DependencyField {
        key: "peerDependencies",
        ecosystem: "npm",
    },
    DependencyField {
        key: "optionalDependencies",
        ecosystem: "npm",
    },
    DependencyField {
        key: "require",
        ecosystem: "composer",
    },
    DependencyField {
        key: "require-dev",
        ecosystem: "composer",
    },
];

/// A fetched manifest, classified by how it is searched
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    Structured(Value),
    Text(String),
}

impl Manifest {
    /// Classifies fetched content by path. Returns `None` for malformed JSON.
    pub fn parse(path: &str, content: String) -> Option<Self> {
        if path.ends_with(".json") {
            match serde_json::from_str::<Value>(&content) {
                Ok(value) => Some(Manifest::Structured(value)),
                Err(e) => {
                    debug!(path, error = %e, "Skipping malformed manifest");
                    None
                }
            }
        } else {
            Some(Manifest::Text(content))
        }
    }
}

/// Aggregated dependency names plus raw text of unstructured manifests
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    names: HashSet<String>,
    raw_texts: Vec<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_name(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn add_raw_text(&mut self, text: impl Into<String>) {
        self.raw_texts.push(text.into());
    }

    /// Merges a manifest: extracted keys for structured data, the whole body otherwise
    pub fn absorb(&mut self, manifest: Manifest) {
        match manifest {
            Manifest::Structured(value) => {
                for field in DEPENDENCY_FIELDS {
                    for name in field.extract(&value) {
                        self.names.insert(name.to_string());
                    }
                }
            }
            Manifest::Text(text) => self.raw_texts.push(text),
        }
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn raw_text_contains(&self, needle: &str) -> bool {
        self.raw_texts.iter().any(|text| text.contains(needle))
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn raw_text_count(&self) -> usize {
        self.raw_texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.raw_texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_merges_all_npm_fields() {
        let mut deps = DependencySet::new();
        deps.absorb(Manifest::Structured(json!({
            "dependencies": {"react": "^18"},
            "devDependencies": {"vitest": "^1"},
            "peerDependencies": {"react-dom": "*"},
            "optionalDependencies": {"fsevents": "*"},
            "scripts": {"build": "vite build"}
        })));

        for name in ["react", "vitest", "react-dom", "fsevents"] {
            assert!(deps.has_name(name), "missing {}", name);
        }
        assert!(!deps.has_name("build"));
        assert_eq!(deps.name_count(), 4);
    }

    #[test]
    fn test_extract_composer_fields() {
        let mut deps = DependencySet::new();
        deps.absorb(Manifest::Structured(json!({
            "require": {"laravel/framework": "^11"},
            "require-dev": {"phpunit/phpunit": "^10"}
        })));
        assert!(deps.has_name("laravel/framework"));
        assert!(deps.has_name("phpunit/phpunit"));
    }

    #[test]
    fn test_field_that_is_not_a_map_is_ignored() {
        let mut deps = DependencySet::new();
        deps.absorb(Manifest::Structured(json!({"dependencies": ["react"]})));
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_classifies_by_extension() {
        let parsed = Manifest::parse("package.json", r#"{"name":"x"}"#.to_string());
        assert!(matches!(parsed, Some(Manifest::Structured(_))));

        let parsed = Manifest::parse("Cargo.toml", "[dependencies]\ntokio = \"1\"".to_string());
        assert!(matches!(parsed, Some(Manifest::Text(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(Manifest::parse("package.json", "{not json".to_string()).is_none());
    }

    #[test]
    fn test_raw_text_substring_search() {
        let mut deps = DependencySet::new();
        deps.absorb(Manifest::Text("[dependencies]\naxum = \"0.7\"\n".to_string()));
        assert!(deps.raw_text_contains("axum"));
        assert!(!deps.raw_text_contains("leptos"));
        assert!(!deps.has_name("axum"));
        assert_eq!(deps.raw_text_count(), 1);
    }
}
