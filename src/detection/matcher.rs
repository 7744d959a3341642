//! Signature matching against file paths and dependency sets
//!
//! All functions are pure. A signature is detected when any of its rules matches; adding
//! paths or dependencies can only add detections, never remove them.

use super::dependencies::DependencySet;
use crate::stack::TechSignature;

/// Matches a file pattern against repository paths.
///
/// Patterns containing `/` match whole path segments at any depth. Plain names match the
/// final segment of a path exactly.
pub fn matches_file_pattern(paths: &[String], pattern: &str) -> bool {
    if pattern.contains('/') {
        let prefix = format!("{}/", pattern);
        let suffix = format!("/{}", pattern);
        let infix = format!("/{}/", pattern);
        return paths.iter().any(|path| {
            path == pattern
                || path.starts_with(&prefix)
                || path.ends_with(&suffix)
                || path.contains(&infix)
        });
    }

    paths.iter().any(|path| file_name(path) == pattern)
}

/// Literal suffix match, so multi-dot suffixes such as `.d.ts` need no special handling
pub fn matches_extension(paths: &[String], extension: &str) -> bool {
    paths.iter().any(|path| path.ends_with(extension))
}

/// Exact key lookup, falling back to substring search of unstructured manifests
pub fn matches_dependency(dependencies: &DependencySet, name: &str) -> bool {
    dependencies.has_name(name) || dependencies.raw_text_contains(name)
}

/// True if any file pattern or extension of the signature matches
pub fn matches_paths(signature: &TechSignature, paths: &[String]) -> bool {
    signature
        .files
        .iter()
        .any(|pattern| matches_file_pattern(paths, pattern))
        || signature
            .extensions
            .iter()
            .any(|ext| matches_extension(paths, ext))
}

/// True if any declared dependency name matches
pub fn matches_dependencies(signature: &TechSignature, dependencies: &DependencySet) -> bool {
    signature
        .dependencies
        .iter()
        .any(|name| matches_dependency(dependencies, name))
}

/// Full detection rule: any path rule OR any dependency rule
pub fn matches(signature: &TechSignature, paths: &[String], dependencies: &DependencySet) -> bool {
    matches_paths(signature, paths) || matches_dependencies(signature, dependencies)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::dependencies::Manifest;
    use serde_json::json;
    use yare::parameterized;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[parameterized(
        exact = { "X/Y", "X/Y", true },
        nested_below = { "X/Y/Z", "X/Y", true },
        nested_above = { "A/X/Y", "X/Y", true },
        nested_middle = { "A/X/Y/Z", "X/Y", true },
        partial_segment = { "AX/Y", "X/Y", false },
        partial_tail = { "X/YZ", "X/Y", false },
        workflows_file = { ".github/workflows/ci.yml", ".github/workflows", true },
        root_name = { "Dockerfile", "Dockerfile", true },
        nested_name = { "docker/Dockerfile", "Dockerfile", true },
        name_suffix_only = { "MyDockerfile", "Dockerfile", false },
        name_as_directory = { "Dockerfile/readme.md", "Dockerfile", false },
    )]
    fn test_matches_file_pattern(path: &str, pattern: &str, expected: bool) {
        assert_eq!(matches_file_pattern(&paths(&[path]), pattern), expected);
    }

    #[parameterized(
        ts = { "a/b.test.ts", ".ts", true },
        tsx_is_not_ts = { "a/b.tsx", ".ts", false },
        declaration = { "types/index.d.ts", ".d.ts", true },
        declaration_vs_plain = { "src/index.ts", ".d.ts", false },
        rust = { "src/main.rs", ".rs", true },
    )]
    fn test_matches_extension(path: &str, ext: &str, expected: bool) {
        assert_eq!(matches_extension(&paths(&[path]), ext), expected);
    }

    #[test]
    fn test_matches_dependency_structured_and_text() {
        let mut deps = DependencySet::new();
        deps.absorb(Manifest::Structured(json!({"dependencies": {"react": "^18"}})));
        deps.absorb(Manifest::Text("module example.com/x\nrequire github.com/gin-gonic/gin v1".into()));

        assert!(matches_dependency(&deps, "react"));
        assert!(matches_dependency(&deps, "gin-gonic/gin"));
        assert!(!matches_dependency(&deps, "vue"));
    }

    #[test]
    fn test_text_match_accepts_containment() {
        let mut deps = DependencySet::new();
        deps.add_raw_text("django-rest-framework==3.14");
        assert!(matches_dependency(&deps, "django"));
    }

    #[test]
    fn test_structured_match_is_exact() {
        let mut deps = DependencySet::new();
        deps.insert_name("react-dom");
        assert!(!matches_dependency(&deps, "react"));
    }

    #[test]
    fn test_signature_matches_on_any_rule() {
        let sig = TechSignature::language("TypeScript")
            .files(&["tsconfig.json"])
            .extensions(&[".ts"])
            .dependencies(&["typescript"]);
        let empty = DependencySet::new();

        assert!(matches(&sig, &paths(&["tsconfig.json"]), &empty));
        assert!(matches(&sig, &paths(&["src/a.ts"]), &empty));

        let mut deps = DependencySet::new();
        deps.insert_name("typescript");
        assert!(matches(&sig, &[], &deps));
        assert!(!matches(&sig, &paths(&["src/a.js"]), &empty));
    }

    #[test]
    fn test_matching_is_monotonic() {
        let sig = TechSignature::infrastructure("Docker").files(&["Dockerfile"]);
        let mut files = paths(&["Dockerfile"]);
        assert!(matches_paths(&sig, &files));
        files.extend(paths(&["src/a.rs", "README.md", "docs/Dockerfile.md"]));
        assert!(matches_paths(&sig, &files));
    }
}
