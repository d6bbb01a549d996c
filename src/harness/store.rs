//! On-disk layout of a harness run.
//!
//! ```text
//! <test_dir>/
//!   logs/<owner>_<repo>.json
//!   reports/report-<timestamp>.json   (UTC, millisecond resolution)
//!   repos/<owner>_<repo>/
//! ```

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::report::Report;
use super::result::AnalysisResult;
use crate::error::Result;
use crate::fetch::RepositorySpec;

/// Writes per-repository logs and aggregate reports.
#[derive(Debug, Clone)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// Where clones are placed.
    pub fn repos_dir(&self) -> PathBuf {
        self.root.join("repos")
    }

    /// Create `logs/`, `reports/` and `repos/`.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.logs_dir(), self.reports_dir(), self.repos_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Path of the log file for `repo`.
    pub fn log_path(&self, repo: &RepositorySpec) -> PathBuf {
        self.logs_dir().join(format!("{}.json", repo.slug()))
    }

    /// Persist one repository's result.
    pub fn save_result(&self, repo: &RepositorySpec, result: &AnalysisResult) -> Result<PathBuf> {
        let path = self.log_path(repo);
        write_json(&path, result)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Path of the report file, named after the report's timestamp to the
    /// millisecond so back-to-back runs keep separate reports.
    pub fn report_path(&self, report: &Report) -> PathBuf {
        self.reports_dir().join(format!(
            "report-{}.json",
            report.timestamp.format("%Y%m%dT%H%M%S-%3f")
        ))
    }

    /// Persist the aggregate report.
    pub fn save_report(&self, report: &Report) -> Result<PathBuf> {
        let path = self.report_path(report);
        write_json(&path, report)?;
        Ok(path)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
