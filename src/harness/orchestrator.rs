//! Batch driver: fetch, analyze and persist every configured repository.

use std::time::Duration;

use super::analyzer::Analyzer;
use super::report::{ExitPolicy, Report};
use super::result::AnalysisResult;
use super::store::ResultStore;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, GitFetcher, RepositorySpec};
use crate::plan::ActionPlanGenerator;
use crate::planner::build_planner;

/// Progress events emitted while a batch runs.
#[derive(Debug)]
pub enum HarnessProgress<'a> {
    /// A repository is about to be fetched.
    RepoStarting {
        repo: &'a RepositorySpec,
        index: usize,
        total: usize,
    },
    /// A repository's result has been persisted.
    RepoFinished { result: &'a AnalysisResult },
}

/// Drives the pipeline over a list of repositories, one at a time.
pub struct Orchestrator {
    fetcher: Box<dyn Fetcher>,
    analyzer: Analyzer,
    store: ResultStore,
    repositories: Vec<RepositorySpec>,
    exit_policy: ExitPolicy,
}

impl Orchestrator {
    /// Create an orchestrator with the default analyzer and a threshold
    /// policy of 80%.
    pub fn new(fetcher: Box<dyn Fetcher>, store: ResultStore) -> Self {
        Self {
            fetcher,
            analyzer: Analyzer::default(),
            store,
            repositories: Vec::new(),
            exit_policy: ExitPolicy::Threshold(80.0),
        }
    }

    /// Build everything from configuration: a git fetcher into
    /// `<test_dir>/repos` and the configured extractor and planner.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let store = ResultStore::new(&config.test_dir);
        let fetcher = GitFetcher::new(store.repos_dir())
            .with_base_url(&config.clone_base_url)
            .with_timeout(Duration::from_secs(config.clone_timeout_secs));

        let generator = ActionPlanGenerator::new(config.extractor.build())
            .with_max_run_commands(config.max_run_commands)
            .with_clone_base_url(&config.clone_base_url);
        let planner = build_planner(&config.planner)?;

        Ok(Self::new(Box::new(fetcher), store)
            .with_analyzer(Analyzer::new(generator).with_planner(planner))
            .with_repositories(config.repositories.clone())
            .with_exit_policy(ExitPolicy::from_kind(
                config.exit_policy,
                config.success_threshold,
            )))
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<RepositorySpec>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    pub fn repositories(&self) -> &[RepositorySpec] {
        &self.repositories
    }

    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Fetch and analyze one repository. Failures are recorded, not returned.
    pub fn analyze_repo(&self, repo: &RepositorySpec) -> AnalysisResult {
        let clone = self.fetcher.fetch(repo);
        let root = clone
            .path
            .clone()
            .unwrap_or_else(|| self.fetcher.destination(repo));
        self.analyzer.analyze(repo, clone, &root)
    }

    /// Run the batch and write the aggregate report.
    pub fn run(&self) -> Result<Report> {
        self.run_with_progress(|_| {})
    }

    /// Run the batch, reporting progress through `on_progress`.
    ///
    /// # Errors
    ///
    /// Only workspace I/O errors abort the batch; per-repository failures
    /// are part of the report.
    pub fn run_with_progress<F>(&self, mut on_progress: F) -> Result<Report>
    where
        F: FnMut(HarnessProgress<'_>),
    {
        self.store.ensure_dirs()?;
        let total = self.repositories.len();
        tracing::info!(
            "Analyzing {} repositories in {}",
            total,
            self.store.root().display()
        );

        let mut results = Vec::with_capacity(total);
        for (index, repo) in self.repositories.iter().enumerate() {
            on_progress(HarnessProgress::RepoStarting { repo, index, total });

            let result = self.analyze_repo(repo);
            self.store.save_result(repo, &result)?;
            on_progress(HarnessProgress::RepoFinished { result: &result });

            results.push(result);
        }

        let report = Report::build(results, self.exit_policy);
        let path = self.store.save_report(&report)?;
        tracing::info!(
            "Clone success rate {:.1}%, report written to {}",
            report.success_rate,
            path.display()
        );

        Ok(report)
    }
}
