//! Per-repository analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::detection::{DependencySet, Readme};
use crate::fetch::{CloneResult, RepositorySpec};
use crate::plan::ActionPlan;
use crate::planner::PlannerVerdict;

/// Pipeline stage a repository stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Clone,
    Readme,
    Planner,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Clone => f.write_str("clone"),
            Stage::Readme => f.write_str("readme"),
            Stage::Planner => f.write_str("planner"),
        }
    }
}

/// Why a repository did not make it through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub stage: Stage,
    pub reason: String,
}

/// README lookup outcome as recorded in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeOutcome {
    pub found: bool,
    /// File name that matched.
    pub source: Option<String>,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl ReadmeOutcome {
    pub fn found(readme: &Readme) -> Self {
        Self {
            found: true,
            source: Some(readme.file_name.clone()),
            content: Some(readme.content.clone()),
            error: None,
        }
    }

    pub fn missing(error: impl Into<String>) -> Self {
        Self {
            found: false,
            source: None,
            content: None,
            error: Some(error.into()),
        }
    }
}

/// Everything learned about one repository in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub repo: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
    pub clone: CloneResult,
    pub readme: ReadmeOutcome,
    pub dependencies: Option<DependencySet>,
    pub action_plan: Option<ActionPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner: Option<PlannerVerdict>,
    pub failure: Option<Failure>,
}

impl AnalysisResult {
    /// Start a record for `repo` after its fetch attempt.
    pub fn new(repo: &RepositorySpec, clone: CloneResult) -> Self {
        Self {
            repo: repo.name.clone(),
            language: repo.language.clone(),
            timestamp: Utc::now(),
            clone,
            readme: ReadmeOutcome::default(),
            dependencies: None,
            action_plan: None,
            planner: None,
            failure: None,
        }
    }

    /// Record the stage that stopped this repository.
    pub fn fail(&mut self, stage: Stage, reason: impl Into<String>) {
        self.failure = Some(Failure {
            stage,
            reason: reason.into(),
        });
    }

    /// Whether every stage completed.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn cloned(&self) -> bool {
        self.clone.success
    }

    pub fn readme_found(&self) -> bool {
        self.readme.found
    }

    /// Number of run-command candidates in the plan (0 without a plan).
    pub fn run_command_count(&self) -> usize {
        self.action_plan
            .as_ref()
            .map(|p| p.run_commands.len())
            .unwrap_or(0)
    }
}
