//! Manifest detection.

use std::path::Path;

use super::file_detection::file_exists;
use super::types::{DependencySet, Ecosystem};

/// Known manifest filenames and the ecosystem each implies, in check order.
pub const MANIFEST_TABLE: &[(&str, Ecosystem)] = &[
    ("requirements.txt", Ecosystem::Python),
    ("Pipfile", Ecosystem::Python),
    ("pyproject.toml", Ecosystem::Python),
    ("setup.py", Ecosystem::Python),
    ("package.json", Ecosystem::Node),
    ("Cargo.toml", Ecosystem::Rust),
    ("go.mod", Ecosystem::Go),
    ("CMakeLists.txt", Ecosystem::Cpp),
    ("Makefile", Ecosystem::Other),
];

/// Detects ecosystems from manifest files at a repository root.
pub struct ManifestDetector;

impl ManifestDetector {
    /// Check every entry of [`MANIFEST_TABLE`] against `repo_root`.
    ///
    /// Existence only; manifest contents are never read.
    pub fn detect(repo_root: &Path) -> DependencySet {
        let mut deps = DependencySet::default();

        for (manifest, ecosystem) in MANIFEST_TABLE {
            if file_exists(repo_root, manifest) {
                tracing::debug!("Found {} ({})", manifest, ecosystem);
                deps.mark(*ecosystem, manifest);
            }
        }

        deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_detects_nothing() {
        let temp = TempDir::new().unwrap();

        let deps = ManifestDetector::detect(temp.path());

        assert_eq!(deps, DependencySet::default());
    }

    #[test]
    fn detect_node_project() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let deps = ManifestDetector::detect(temp.path());

        assert!(deps.node);
        assert!(!deps.python);
        assert_eq!(deps.manifests, vec!["package.json"]);
    }

    #[test]
    fn any_python_manifest_sets_python() {
        for manifest in ["requirements.txt", "Pipfile", "pyproject.toml", "setup.py"] {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join(manifest), "").unwrap();

            assert!(
                ManifestDetector::detect(temp.path()).python,
                "{} should imply python",
                manifest
            );
        }
    }

    #[test]
    fn makefile_is_other_not_cpp() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Makefile"), "all:\n").unwrap();

        let deps = ManifestDetector::detect(temp.path());

        assert!(!deps.cpp);
        assert_eq!(deps.other, vec!["Makefile"]);
    }

    #[test]
    fn multi_language_keeps_table_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Makefile"), "").unwrap();
        fs::write(temp.path().join("Cargo.toml"), "").unwrap();
        fs::write(temp.path().join("pyproject.toml"), "").unwrap();
        fs::write(temp.path().join("CMakeLists.txt"), "").unwrap();

        let deps = ManifestDetector::detect(temp.path());

        assert_eq!(
            deps.manifests,
            vec!["pyproject.toml", "Cargo.toml", "CMakeLists.txt", "Makefile"]
        );
        assert_eq!(
            deps.detected(),
            vec![Ecosystem::Python, Ecosystem::Rust, Ecosystem::Cpp]
        );
    }

    #[test]
    fn nested_manifests_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("web")).unwrap();
        fs::write(temp.path().join("web/package.json"), "{}").unwrap();

        assert!(ManifestDetector::detect(temp.path()).is_empty());
    }
}
