//! README discovery.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::file_detection::first_regular_file;
use crate::error::{Result, RunthisError};

/// README filenames tried in order; the first regular file wins.
pub const README_CANDIDATES: &[&str] = &[
    "README.md",
    "readme.md",
    "Readme.md",
    "README.txt",
    "readme.txt",
    "README.rst",
    "README",
    "readme",
];

/// A README that was found and read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readme {
    /// Which candidate matched.
    pub file_name: String,

    /// Full path to the file.
    pub path: PathBuf,

    /// File contents, decoded lossily as UTF-8.
    pub content: String,
}

/// Finds the README of a repository.
pub struct ReadmeLocator;

impl ReadmeLocator {
    /// Return the first existing candidate's text.
    ///
    /// # Errors
    ///
    /// Returns `ReadmeNotFound` if no candidate exists, or `Io` if the
    /// matching file cannot be read.
    pub fn locate(repo_root: &Path) -> Result<Readme> {
        let file_name = first_regular_file(repo_root, README_CANDIDATES).ok_or_else(|| {
            RunthisError::ReadmeNotFound {
                path: repo_root.to_path_buf(),
            }
        })?;

        let path = repo_root.join(&file_name);
        let bytes = fs::read(&path)?;
        tracing::debug!("Read {} ({} bytes)", path.display(), bytes.len());

        Ok(Readme {
            file_name,
            path,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_readme_md() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# Hello").unwrap();

        let readme = ReadmeLocator::locate(temp.path()).unwrap();

        assert_eq!(readme.file_name, "README.md");
        assert_eq!(readme.content, "# Hello");
    }

    #[test]
    fn falls_back_to_plain_readme() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README"), "plain text").unwrap();

        let readme = ReadmeLocator::locate(temp.path()).unwrap();

        assert_eq!(readme.content, "plain text");
        assert!(readme.path.ends_with("README"));
    }

    #[test]
    fn prefers_markdown_over_txt() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.txt"), "txt").unwrap();
        fs::write(temp.path().join("README.md"), "md").unwrap();

        let readme = ReadmeLocator::locate(temp.path()).unwrap();

        assert_eq!(readme.content, "md");
    }

    #[test]
    fn missing_readme_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("CONTRIBUTING.md"), "").unwrap();

        let err = ReadmeLocator::locate(temp.path()).unwrap_err();

        assert!(matches!(err, RunthisError::ReadmeNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), b"ok \xff\xfe done").unwrap();

        let readme = ReadmeLocator::locate(temp.path()).unwrap();

        assert!(readme.content.starts_with("ok "));
        assert!(readme.content.ends_with(" done"));
    }
}
