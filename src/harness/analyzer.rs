//! The per-repository pipeline after a checkout is on disk.

use std::path::Path;

use super::result::{AnalysisResult, ReadmeOutcome, Stage};
use crate::detection::{ManifestDetector, ReadmeLocator};
use crate::fetch::{CloneResult, RepositorySpec};
use crate::plan::ActionPlanGenerator;
use crate::planner::{PlanRequest, Planner, PlannerVerdict, StubPlanner};

/// Runs README lookup, manifest detection, plan generation and the
/// planner over one checkout. Stops at the first failing stage.
pub struct Analyzer {
    generator: ActionPlanGenerator,
    planner: Option<Box<dyn Planner>>,
}

/// Default generator with the stub planner, the same as an empty config.
impl Default for Analyzer {
    fn default() -> Self {
        Self::new(ActionPlanGenerator::default()).with_planner(Some(Box::new(StubPlanner)))
    }
}

impl Analyzer {
    /// An analyzer that consults no planner until one is attached.
    pub fn new(generator: ActionPlanGenerator) -> Self {
        Self {
            generator,
            planner: None,
        }
    }

    /// Consult `planner` after a plan is generated.
    pub fn with_planner(mut self, planner: Option<Box<dyn Planner>>) -> Self {
        self.planner = planner;
        self
    }

    pub fn generator(&self) -> &ActionPlanGenerator {
        &self.generator
    }

    pub fn planner_name(&self) -> Option<&str> {
        self.planner.as_deref().map(|p| p.name())
    }

    /// Analyze `repo` given its fetch outcome.
    ///
    /// A failed clone is recorded as a clone-stage failure and nothing else
    /// runs. Otherwise the checkout at `root` is inspected.
    pub fn analyze(&self, repo: &RepositorySpec, clone: CloneResult, root: &Path) -> AnalysisResult {
        let mut result = AnalysisResult::new(repo, clone);

        if !result.clone.success {
            let reason = result
                .clone
                .error
                .clone()
                .unwrap_or_else(|| "clone failed".to_string());
            tracing::warn!("{}: clone failed: {}", repo.name, reason);
            result.fail(Stage::Clone, reason);
            return result;
        }

        let readme = match ReadmeLocator::locate(root) {
            Ok(readme) => readme,
            Err(e) => {
                tracing::warn!("{}: {}", repo.name, e);
                result.readme = ReadmeOutcome::missing(e.to_string());
                result.fail(Stage::Readme, e.to_string());
                return result;
            }
        };
        tracing::debug!("{}: using {}", repo.name, readme.file_name);
        result.readme = ReadmeOutcome::found(&readme);

        let deps = ManifestDetector::detect(root);
        tracing::debug!("{}: manifests {:?}", repo.name, deps.manifests);

        let plan = self.generator.generate(&repo.name, &readme.content, &deps);
        tracing::debug!(
            "{}: {} run command candidate(s)",
            repo.name,
            plan.run_commands.len()
        );

        if let Some(planner) = self.planner.as_deref() {
            let request = PlanRequest {
                repo,
                readme: &readme.content,
                dependencies: &deps,
                run_commands: &plan.run_commands,
            };
            let verdict = PlannerVerdict::consult(planner, &request);
            if let Some(message) = verdict.failure_message.as_ref().filter(|_| verdict.failed) {
                result.fail(Stage::Planner, message.clone());
            }
            result.planner = Some(verdict);
        }

        result.dependencies = Some(deps);
        result.action_plan = Some(plan);
        result
    }
}
