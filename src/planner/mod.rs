//! Planning service abstraction.
//!
//! A [`Planner`] answers "given this repository's metadata and README, how
//! do I install and run it?". The harness only ever talks to the trait:
//!
//! - [`StubPlanner`] - deterministic table, used by default and in tests
//! - [`OpenAiPlanner`] - OpenAI-compatible chat completions endpoint

pub mod openai;
pub mod stub;

pub use openai::OpenAiPlanner;
pub use stub::StubPlanner;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{PlannerConfig, PlannerKind};
use crate::detection::DependencySet;
use crate::fetch::RepositorySpec;

/// Message recorded when a planner cannot tell how to run a project.
pub const UNDETERMINED_MESSAGE: &str = "Unable to determine how to run this project";

/// Errors a planner can report.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The planner ran but could not decide how to run the project.
    #[error("{message}")]
    Undetermined { message: String },

    /// The API key environment variable is not set.
    #[error("Planner API key not set: export {var}")]
    MissingApiKey { var: String },

    /// Transport failure or non-success HTTP status.
    #[error("Planner request failed: {0}")]
    Http(String),

    /// The service answered with something that is not a plan.
    #[error("Planner returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl PlannerError {
    /// The standard "could not determine" failure.
    pub fn undetermined() -> Self {
        Self::Undetermined {
            message: UNDETERMINED_MESSAGE.to_string(),
        }
    }
}

/// Everything a planner gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub repo: &'a RepositorySpec,
    pub readme: &'a str,
    pub dependencies: &'a DependencySet,
    /// Candidates the local extractor already found.
    pub run_commands: &'a [String],
}

/// A planner's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub language: String,
    pub install: String,
    pub run: String,
}

/// Capability: turn repository metadata into install/run commands.
pub trait Planner {
    /// Short name recorded in results.
    fn name(&self) -> &str;

    /// Produce a plan or a failure signal.
    fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanResponse, PlannerError>;
}

/// The prompt sent for a repository.
pub fn planning_prompt(repo: &str) -> String {
    format!("Determine how to run {} from README", repo)
}

/// Recorded outcome of consulting a planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerVerdict {
    pub planner: String,
    pub prompt: String,
    pub response: Option<PlanResponse>,
    pub failed: bool,
    pub failure_message: Option<String>,
}

impl PlannerVerdict {
    /// Ask `planner` and record what happened.
    pub fn consult(planner: &dyn Planner, request: &PlanRequest<'_>) -> Self {
        let prompt = planning_prompt(&request.repo.name);

        match planner.plan(request) {
            Ok(response) => Self {
                planner: planner.name().to_string(),
                prompt,
                response: Some(response),
                failed: false,
                failure_message: None,
            },
            Err(e) => {
                tracing::warn!("Planner '{}' failed for {}: {}", planner.name(), request.repo.name, e);
                Self {
                    planner: planner.name().to_string(),
                    prompt,
                    response: None,
                    failed: true,
                    failure_message: Some(e.to_string()),
                }
            }
        }
    }
}

/// Build the planner selected by configuration.
///
/// Returns `Ok(None)` when planning is disabled.
pub fn build_planner(config: &PlannerConfig) -> Result<Option<Box<dyn Planner>>, PlannerError> {
    match config.kind {
        PlannerKind::None => Ok(None),
        PlannerKind::Stub => Ok(Some(Box::new(StubPlanner))),
        PlannerKind::OpenAi => {
            let planner = OpenAiPlanner::from_env(&config.api_key_env)?
                .with_base_url(&config.base_url)
                .with_model(&config.model)
                .with_timeout(std::time::Duration::from_secs(config.timeout_secs));
            Ok(Some(Box::new(planner)))
        }
    }
}
