//! End-to-end harness tests through the public API.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use httpmock::prelude::*;
use runthis::config::{ExitPolicyKind, HarnessConfig, PlannerConfig, PlannerKind};
use runthis::fetch::{CloneResult, Fetcher, RepositorySpec};
use runthis::harness::{Analyzer, ExitPolicy, Orchestrator, ResultStore, Stage};
use runthis::plan::ActionPlanGenerator;
use runthis::planner::{build_planner, OpenAiPlanner, Planner};
use serde_json::json;
use tempfile::TempDir;

/// Fails the first `failures` fetches, then serves a node checkout.
struct FlakyFetcher {
    root: PathBuf,
    failures: Cell<usize>,
}

impl Fetcher for FlakyFetcher {
    fn destination(&self, repo: &RepositorySpec) -> PathBuf {
        self.root.join(repo.slug())
    }

    fn fetch(&self, repo: &RepositorySpec) -> CloneResult {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return CloneResult::failed("fatal: could not read from remote repository");
        }
        let dest = self.destination(repo);
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("package.json"), "{}").unwrap();
        fs::write(dest.join("README.md"), "Run: npm start\n").unwrap();
        CloneResult::cloned(dest)
    }
}

fn trending(n: usize) -> Vec<RepositorySpec> {
    (0..n)
        .map(|i| RepositorySpec::new(&format!("trending/project{}", i), "TypeScript"))
        .collect()
}

fn git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn ten_repos_eight_clones_meets_threshold() {
    let temp = TempDir::new().unwrap();
    let fetcher = FlakyFetcher {
        root: temp.path().join("fixtures"),
        failures: Cell::new(2),
    };

    let report = Orchestrator::new(Box::new(fetcher), ResultStore::new(temp.path().join("ws")))
        .with_repositories(trending(10))
        .with_exit_policy(ExitPolicy::Threshold(80.0))
        .run()
        .unwrap();

    assert_eq!(report.success_rate, 80.0);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.successful_reads, 8);
    assert_eq!(report.summary.repos_with_deps, 8);
    assert_eq!(report.summary.most_common_deps[0].count, 8);
    assert!((report.summary.avg_run_commands - 0.8).abs() < f64::EPSILON);
    assert_eq!(fs::read_dir(temp.path().join("ws/logs")).unwrap().count(), 10);
}

#[test]
fn persisted_log_matches_result_shape() {
    let temp = TempDir::new().unwrap();
    let fetcher = FlakyFetcher {
        root: temp.path().join("fixtures"),
        failures: Cell::new(1),
    };

    Orchestrator::new(Box::new(fetcher), ResultStore::new(temp.path()))
        .with_repositories(trending(2))
        .run()
        .unwrap();

    let failed: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("logs/trending_project0.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(failed["failure"]["stage"], "clone");
    assert!(failed["dependencies"].is_null());
    assert!(failed["action_plan"].is_null());

    let passed: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("logs/trending_project1.json")).unwrap(),
    )
    .unwrap();
    assert!(passed["failure"].is_null());
    assert_eq!(passed["dependencies"]["node"], true);
    assert_eq!(passed["action_plan"]["dependencies"]["node"], "npm install");
    assert_eq!(passed["action_plan"]["dependencies"]["python"], "No Python deps");
    assert_eq!(
        passed["action_plan"]["dry_run_notes"][3],
        "[DRY-RUN] No actual system changes made - test mode enabled"
    );
    assert_eq!(passed["planner"]["prompt"], "Determine how to run trending/project1 from README");
}

#[test]
fn openai_planner_through_analyzer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"language\":\"python\",\"install\":\"pip install .\",\"run\":\"python -m app\"}"
                }
            }]
        }));
    });

    let planner = OpenAiPlanner::new("sk-test".to_string())
        .unwrap()
        .with_base_url(&server.url("/v1"));
    let analyzer = Analyzer::new(ActionPlanGenerator::default())
        .with_planner(Some(Box::new(planner) as Box<dyn Planner>));

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pyproject.toml"), "[project]").unwrap();
    fs::write(temp.path().join("README.md"), "python -m app run\n").unwrap();
    let repo = RepositorySpec::new("octo/app", "Python");

    let result = analyzer.analyze(
        &repo,
        CloneResult::already_present(temp.path().to_path_buf()),
        temp.path(),
    );

    mock.assert();
    assert!(result.passed());
    let response = result.planner.unwrap().response.unwrap();
    assert_eq!(response.run, "python -m app");
}

#[test]
fn openai_undetermined_reply_is_planner_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"language\":\"\",\"install\":\"\",\"run\":\"\"}"
                }
            }]
        }));
    });

    // Unique to this test so parallel tests never race on it.
    let key_var = "RUNTHIS_HARNESS_API_TEST_KEY";
    std::env::set_var(key_var, "sk-test");
    let config = PlannerConfig {
        kind: PlannerKind::OpenAi,
        base_url: server.base_url(),
        api_key_env: key_var.to_string(),
        ..Default::default()
    };
    let planner = build_planner(&config).unwrap();

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "Docs only.\n").unwrap();
    let analyzer = Analyzer::default().with_planner(planner);

    let result = analyzer.analyze(
        &RepositorySpec::new("octo/docs", ""),
        CloneResult::already_present(temp.path().to_path_buf()),
        temp.path(),
    );

    let failure = result.failure.unwrap();
    assert_eq!(failure.stage, Stage::Planner);
    assert!(failure.reason.contains("Unable to determine"));
}

#[test]
fn config_driven_run_against_local_origin() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    let repo_dir = origin.join("octo").join("cat.git");
    fs::create_dir_all(&repo_dir).unwrap();
    fs::write(repo_dir.join("README.md"), "```\n$ cargo run --release\n```\n").unwrap();
    fs::write(repo_dir.join("Cargo.toml"), "[package]").unwrap();

    let ready = git(&["init", "--initial-branch=main"], &repo_dir)
        && git(&["config", "user.name", "Test"], &repo_dir)
        && git(&["config", "user.email", "test@test.com"], &repo_dir)
        && git(&["add", "."], &repo_dir)
        && git(&["commit", "-m", "Initial commit"], &repo_dir);
    if !ready {
        eprintln!("git unavailable, skipping");
        return;
    }

    let config: HarnessConfig = serde_yaml::from_str(&format!(
        r#"
test_dir: {test_dir}
clone_base_url: file://{origin}
exit_policy: always-succeed
extractor: fenced
planner:
  kind: stub
repositories:
  - name: octo/cat
    language: Rust
  - name: octo/ghost
    language: Go
"#,
        test_dir = temp.path().join("ws").display(),
        origin = origin.display(),
    ))
    .unwrap();
    assert_eq!(config.exit_policy, ExitPolicyKind::AlwaysSucceed);

    let report = Orchestrator::from_config(&config).unwrap().run().unwrap();

    assert_eq!(report.successful_clones, 1);
    assert_eq!(report.success_rate, 50.0);
    assert_eq!(report.exit_code(), 0);
    let cat = &report.results[0];
    assert!(cat.passed());
    assert_eq!(
        cat.action_plan.as_ref().unwrap().run_commands,
        vec!["cargo run --release".to_string()]
    );
    assert_eq!(report.failure_modes[0].repo, "octo/ghost");
    assert!(temp.path().join("ws/repos/octo_cat/Cargo.toml").is_file());
}
