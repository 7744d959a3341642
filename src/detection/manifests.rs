//! Manifest discovery

/// Structured manifest searched for throughout the tree
pub const PRIMARY_MANIFEST: &str = "package.json";

/// Upper bound on primary manifests fetched per scan
pub const MAX_PRIMARY_MANIFESTS: usize = 20;

/// Root-level manifests of other ecosystems, fetched alongside the primary ones
pub const ALTERNATE_MANIFESTS: &[&str] = &[
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "requirements.txt",
    "composer.json",
    "Gemfile",
];

/// Paths to fetch for dependency extraction.
///
/// With a tree, every `package.json` at any depth is selected (in tree order, capped at
/// [`MAX_PRIMARY_MANIFESTS`]). Without one, only the root manifest is tried. The root
/// alternates are always appended.
pub fn discover_manifests(tree: Option<&[String]>) -> Vec<String> {
    let mut paths: Vec<String> = match tree {
        Some(tree) if !tree.is_empty() => tree
            .iter()
            .filter(|path| is_primary_manifest(path))
            .take(MAX_PRIMARY_MANIFESTS)
            .cloned()
            .collect(),
        _ => vec![PRIMARY_MANIFEST.to_string()],
    };

    for alt in ALTERNATE_MANIFESTS {
        if !paths.iter().any(|p| p == alt) {
            paths.push((*alt).to_string());
        }
    }
    paths
}

fn is_primary_manifest(path: &str) -> bool {
    path == PRIMARY_MANIFEST
        || path
            .strip_suffix(PRIMARY_MANIFEST)
            .is_some_and(|prefix| prefix.ends_with('/'))
}
