//! File existence helpers.

use std::path::Path;

/// Check if a file exists relative to the repository root.
pub fn file_exists(root: &Path, file: &str) -> bool {
    root.join(file).exists()
}

/// Return the first of `files` that exists as a regular file.
pub fn first_regular_file(root: &Path, files: &[&str]) -> Option<String> {
    files
        .iter()
        .find(|f| root.join(f).is_file())
        .map(|f| f.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_exists_helper() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod"), "").unwrap();

        assert!(file_exists(temp.path(), "go.mod"));
        assert!(!file_exists(temp.path(), "Cargo.toml"));
    }

    #[test]
    fn first_regular_file_respects_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("c.txt"), "").unwrap();

        let found = first_regular_file(temp.path(), &["a.txt", "c.txt", "b.txt"]);
        assert_eq!(found, Some("c.txt".to_string()));
    }

    #[test]
    fn first_regular_file_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("README")).unwrap();

        assert_eq!(first_regular_file(temp.path(), &["README"]), None);
    }
}
