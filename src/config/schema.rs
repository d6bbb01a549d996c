//! Configuration schema definitions for runthis.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fetch::{default_repositories, RepositorySpec, DEFAULT_BASE_URL};
use crate::plan::{ExtractorKind, DEFAULT_MAX_RUN_COMMANDS};
use crate::planner::openai;

/// Root configuration structure for `.runthis/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Root of the harness workspace (`logs/`, `reports/`, `repos/`).
    pub test_dir: PathBuf,

    /// Host repositories are cloned from.
    pub clone_base_url: String,

    /// Per-clone timeout in seconds.
    pub clone_timeout_secs: u64,

    /// How the batch outcome maps to an exit code.
    pub exit_policy: ExitPolicyKind,

    /// Minimum clone success rate (percent) for the threshold policy.
    pub success_threshold: f64,

    /// Cap on run-command candidates per repository.
    pub max_run_commands: usize,

    /// Run-command extraction strategy.
    pub extractor: ExtractorKind,

    /// Planning service settings.
    pub planner: PlannerConfig,

    /// Repositories to analyze, in order.
    pub repositories: Vec<RepositorySpec>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            test_dir: default_test_dir(),
            clone_base_url: DEFAULT_BASE_URL.to_string(),
            clone_timeout_secs: 60,
            exit_policy: ExitPolicyKind::default(),
            success_threshold: 80.0,
            max_run_commands: DEFAULT_MAX_RUN_COMMANDS,
            extractor: ExtractorKind::default(),
            planner: PlannerConfig::default(),
            repositories: default_repositories(),
        }
    }
}

fn default_test_dir() -> PathBuf {
    std::env::temp_dir().join("runthis_tests")
}

/// Exit-code policy for a harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicyKind {
    /// Always exit 0; failures are the thing being exercised.
    AlwaysSucceed,
    /// Exit 1 when the clone success rate is below the threshold.
    #[default]
    Threshold,
}

impl FromStr for ExitPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always-succeed" => Ok(Self::AlwaysSucceed),
            "threshold" => Ok(Self::Threshold),
            _ => Err(format!(
                "unknown exit policy: {} (expected always-succeed or threshold)",
                s
            )),
        }
    }
}

impl fmt::Display for ExitPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysSucceed => f.write_str("always-succeed"),
            Self::Threshold => f.write_str("threshold"),
        }
    }
}

/// Which planner to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerKind {
    /// Do not consult a planner.
    None,
    /// Deterministic fixed-table planner.
    #[default]
    Stub,
    /// OpenAI-compatible chat completions.
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for PlannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "stub" => Ok(Self::Stub),
            "openai" => Ok(Self::OpenAi),
            _ => Err(format!(
                "unknown planner: {} (expected none, stub or openai)",
                s
            )),
        }
    }
}

impl fmt::Display for PlannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Stub => f.write_str("stub"),
            Self::OpenAi => f.write_str("openai"),
        }
    }
}

/// Planning service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub kind: PlannerKind,

    /// Model name sent to the service.
    pub model: String,

    /// API base URL (`/chat/completions` is appended).
    pub base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            kind: PlannerKind::default(),
            model: openai::DEFAULT_MODEL.to_string(),
            base_url: openai::DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}
