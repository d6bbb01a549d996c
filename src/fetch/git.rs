//! Shallow git cloning into the harness workspace.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::repository::RepositorySpec;
use crate::shell::{execute, CommandOptions};

/// Default base URL repositories are cloned from.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Default per-clone timeout.
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of a single clone attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneResult {
    /// Whether the repository is available locally.
    pub success: bool,

    /// Where the repository lives (set on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// The destination already existed so nothing was cloned.
    #[serde(default)]
    pub already_present: bool,

    /// Diagnostic output when the clone failed.
    pub error: Option<String>,
}

impl CloneResult {
    /// A fresh clone landed at `path`.
    pub fn cloned(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            already_present: false,
            error: None,
        }
    }

    /// The destination was already populated.
    pub fn already_present(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            already_present: true,
            error: None,
        }
    }

    /// The clone failed with a diagnostic.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            already_present: false,
            error: Some(message.into()),
        }
    }
}

/// Makes repositories available on the local filesystem.
///
/// The harness talks to this trait so tests can substitute fixtures for
/// network clones.
pub trait Fetcher {
    /// Local directory a repository is (or would be) placed in.
    fn destination(&self, repo: &RepositorySpec) -> PathBuf;

    /// Make `repo` available locally. Never panics; failures are values.
    fn fetch(&self, repo: &RepositorySpec) -> CloneResult;
}

/// Clones repositories with `git clone --depth 1`.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    repos_dir: PathBuf,
    base_url: String,
    timeout: Duration,
    program: String,
}

impl GitFetcher {
    /// Create a fetcher that clones into `repos_dir`.
    pub fn new(repos_dir: impl Into<PathBuf>) -> Self {
        Self {
            repos_dir: repos_dir.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_CLONE_TIMEOUT,
            program: "git".to_string(),
        }
    }

    /// Clone from a different host (e.g. `file:///srv/mirrors`).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Bound each clone by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    /// Get the clone directory.
    pub fn repos_dir(&self) -> &Path {
        &self.repos_dir
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Remote URL for a repository.
    pub fn clone_url(&self, repo: &RepositorySpec) -> String {
        format!("{}/{}.git", self.base_url, repo.name)
    }

    /// The command line a clone would run, for narration.
    pub fn clone_command(&self, repo: &RepositorySpec) -> String {
        format!("git clone --depth 1 {}", self.clone_url(repo))
    }

    /// Bounded by the timeout, with credential prompts disabled so a
    /// private or missing repository fails instead of waiting on the tty.
    fn clone_options(&self) -> CommandOptions {
        let mut options = CommandOptions {
            timeout: Some(self.timeout),
            ..Default::default()
        };
        options
            .env
            .insert("GIT_TERMINAL_PROMPT".to_string(), "0".to_string());
        options
    }

    fn clone_into(&self, repo: &RepositorySpec, dest: &Path) -> CloneResult {
        if let Err(e) = fs::create_dir_all(&self.repos_dir) {
            return CloneResult::failed(format!(
                "Failed to create {}: {}",
                self.repos_dir.display(),
                e
            ));
        }

        let args = vec![
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            self.clone_url(repo),
            dest.to_string_lossy().to_string(),
        ];
        let outcome = match execute(&self.program, &args, &self.clone_options()) {
            Ok(result) if result.success => return CloneResult::cloned(dest.to_path_buf()),
            Ok(result) if result.timed_out => format!(
                "git clone timed out after {}s",
                self.timeout.as_secs()
            ),
            Ok(result) => {
                let output = result.combined_output();
                let output = output.trim();
                if output.is_empty() {
                    format!("git clone exited with code {:?}", result.exit_code)
                } else {
                    output.to_string()
                }
            }
            Err(e) => e.to_string(),
        };

        // A half-written destination would otherwise be mistaken for a
        // finished clone on the next run.
        if dest.exists() {
            let _ = fs::remove_dir_all(dest);
        }

        CloneResult::failed(outcome)
    }
}

impl Fetcher for GitFetcher {
    fn destination(&self, repo: &RepositorySpec) -> PathBuf {
        self.repos_dir.join(repo.slug())
    }

    fn fetch(&self, repo: &RepositorySpec) -> CloneResult {
        let dest = self.destination(repo);

        if dest.exists() {
            tracing::debug!("{} already present at {}", repo.name, dest.display());
            return CloneResult::already_present(dest);
        }

        tracing::debug!("Cloning {} into {}", repo.name, dest.display());
        let result = self.clone_into(repo, &dest);
        if let Some(error) = &result.error {
            tracing::warn!("Clone of {} failed: {}", repo.name, error);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serialize git-process tests to avoid flaky failures under parallel execution
    static GIT_LOCK: Mutex<()> = Mutex::new(());

    fn git(args: &[&str], cwd: &Path) {
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Create `<origin>/octo/cat.git` as a repository with one commit.
    fn create_origin(origin: &Path) {
        let repo = origin.join("octo").join("cat.git");
        fs::create_dir_all(&repo).unwrap();

        git(&["init", "--initial-branch=main"], &repo);
        git(&["config", "user.name", "Test"], &repo);
        git(&["config", "user.email", "test@test.com"], &repo);
        fs::write(repo.join("README.md"), "# cat\n\n`npm start`\n").unwrap();
        fs::write(repo.join("package.json"), "{}").unwrap();
        git(&["add", "."], &repo);
        git(&["commit", "-m", "Initial commit"], &repo);
    }

    fn file_url(path: &Path) -> String {
        format!("file://{}", path.display())
    }

    #[test]
    fn destination_replaces_slash() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new(temp.path());
        let repo = RepositorySpec::new("octo/cat", "Go");

        assert_eq!(fetcher.destination(&repo), temp.path().join("octo_cat"));
    }

    #[test]
    fn clone_url_uses_base_url() {
        let fetcher = GitFetcher::new("/tmp/x").with_base_url("https://example.com/");
        let repo = RepositorySpec::new("octo/cat", "Go");

        assert_eq!(fetcher.clone_url(&repo), "https://example.com/octo/cat.git");
        assert_eq!(
            fetcher.clone_command(&repo),
            "git clone --depth 1 https://example.com/octo/cat.git"
        );
    }

    #[test]
    fn default_timeout_is_60_seconds() {
        let fetcher = GitFetcher::new("/tmp/x");
        assert_eq!(fetcher.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn existing_destination_skips_clone() {
        let temp = TempDir::new().unwrap();
        // A program that cannot be spawned proves no process ran.
        let fetcher = GitFetcher::new(temp.path()).with_program("runthis-no-such-git");
        let repo = RepositorySpec::new("octo/cat", "Go");
        fs::create_dir_all(fetcher.destination(&repo)).unwrap();

        let result = fetcher.fetch(&repo);

        assert!(result.success);
        assert!(result.already_present);
        assert_eq!(result.path, Some(temp.path().join("octo_cat")));
    }

    #[test]
    fn missing_git_reports_failure() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new(temp.path()).with_program("runthis-no-such-git");
        let repo = RepositorySpec::new("octo/cat", "Go");

        let result = fetcher.fetch(&repo);

        assert!(!result.success);
        assert!(result.error.unwrap().contains("runthis-no-such-git"));
    }

    #[test]
    fn clone_from_local_origin() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        create_origin(&origin);

        let fetcher = GitFetcher::new(temp.path().join("repos")).with_base_url(&file_url(&origin));
        let repo = RepositorySpec::new("octo/cat", "JavaScript");

        let first = fetcher.fetch(&repo);
        assert!(first.success, "clone failed: {:?}", first.error);
        assert!(!first.already_present);
        assert!(temp.path().join("repos/octo_cat/README.md").exists());

        let second = fetcher.fetch(&repo);
        assert!(second.success);
        assert!(second.already_present);
    }

    #[test]
    fn clone_of_unknown_repo_fails_with_diagnostic() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        fs::create_dir_all(&origin).unwrap();

        let fetcher = GitFetcher::new(temp.path().join("repos")).with_base_url(&file_url(&origin));
        let repo = RepositorySpec::new("ghost/town", "Go");

        let result = fetcher.fetch(&repo);

        assert!(!result.success);
        assert!(!result.error.unwrap().is_empty());
        assert!(!fetcher.destination(&repo).exists());
    }

    /// Write an executable stand-in for git. Arguments arrive as
    /// `clone --depth 1 <url> <dest>`.
    #[cfg(unix)]
    fn fake_git(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-git");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn clone_disables_credential_prompts() {
        let options = GitFetcher::new("/tmp/x")
            .with_timeout(Duration::from_secs(5))
            .clone_options();

        assert_eq!(
            options.env.get("GIT_TERMINAL_PROMPT").map(String::as_str),
            Some("0")
        );
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[cfg(unix)]
    #[test]
    fn clone_process_sees_prompt_disabled() {
        let temp = TempDir::new().unwrap();
        let program = fake_git(
            temp.path(),
            r#"[ "$GIT_TERMINAL_PROMPT" = "0" ] || exit 7
mkdir -p "$5""#,
        );
        let fetcher = GitFetcher::new(temp.path().join("repos")).with_program(&program);
        let repo = RepositorySpec::new("octo/private", "Go");

        let result = fetcher.fetch(&repo);

        assert!(result.success, "clone failed: {:?}", result.error);
        assert!(!result.already_present);
    }

    #[cfg(unix)]
    #[test]
    fn timed_out_clone_removes_partial_checkout() {
        let temp = TempDir::new().unwrap();
        let program = fake_git(
            temp.path(),
            r#"mkdir -p "$5" && touch "$5/partial"
sleep 5"#,
        );
        let fetcher = GitFetcher::new(temp.path().join("repos"))
            .with_program(&program)
            .with_timeout(Duration::from_millis(300));
        let repo = RepositorySpec::new("octo/slow", "Go");

        let result = fetcher.fetch(&repo);

        assert!(!result.success);
        assert!(result.error.unwrap().contains("git clone timed out after"));
        assert!(!fetcher.destination(&repo).exists());
    }

    #[test]
    fn clone_result_serializes_error() {
        let json = serde_json::to_value(CloneResult::failed("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("path").is_none());
    }
}
